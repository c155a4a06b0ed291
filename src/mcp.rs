use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Deserialize;

use crate::compare::{compare, parse_compare_ids};
use crate::error::SearchError;
use crate::fetch::{ProviderClient, ProviderConfig};
use crate::filter::FilterState;
use crate::model::NormalizedFlight;
use crate::normalize::normalize;
use crate::offer::offers_from_value;
use crate::query::{SearchCriteria, DEFAULT_LIMIT};
use crate::report::{analyze, Report};
use crate::sort::SortKey;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
struct ViewArgs {
    #[schemars(
        description = "Stop counts to include, comma-separated. 0 = direct, 1 = one stop, 2 = two or more. A round trip counts as its worse leg. Omit for any"
    )]
    stops: Option<String>,
    #[schemars(
        description = "Carrier IATA codes, comma-separated. A flight matches if either leg uses one. Example: BA,AA"
    )]
    airlines: Option<String>,
    #[schemars(description = "Maximum total price")]
    max_price: Option<f64>,
    #[schemars(description = "Minimum outbound duration in minutes (inclusive)")]
    min_duration: Option<u32>,
    #[schemars(description = "Maximum outbound duration in minutes (exclusive)")]
    max_duration: Option<u32>,
    #[schemars(description = "One of: price, duration, departure. Default: price")]
    sort: Option<String>,
    #[schemars(description = "Return only the first N flights after sorting")]
    top: Option<usize>,
    #[schemars(
        description = "Two flight ids, comma-separated, to compare side by side instead of returning the full analysis. Example: 3,7"
    )]
    compare: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct SearchArgs {
    #[schemars(
        description = "Departure airport IATA code, exactly 3 uppercase letters. Example: JFK, CDG"
    )]
    from: String,
    #[schemars(description = "Arrival airport IATA code. Example: LHR")]
    to: String,
    #[schemars(description = "Departure date in YYYY-MM-DD format. Example: 2026-04-01")]
    date: String,
    #[schemars(description = "Return date in YYYY-MM-DD for a round trip")]
    return_date: Option<String>,
    #[schemars(description = "Adult passengers. Default: 1")]
    adults: Option<u32>,
    #[schemars(description = "Maximum offers to request from the provider. Default: 100")]
    limit: Option<usize>,
    #[serde(flatten)]
    view: ViewArgs,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct AnalyzeArgs {
    #[schemars(
        description = "Raw provider flight offers: a JSON array of offers or a {\"data\": [...]} response body"
    )]
    offers: serde_json::Value,
    #[serde(flatten)]
    view: ViewArgs,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct LocationsArgs {
    #[schemars(description = "City or airport name fragment, at least 2 characters. Example: lond")]
    keyword: String,
}

fn tool_error(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    match serde_json::to_string_pretty(value) {
        Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
        Err(e) => tool_error(format!("failed to encode result: {e}")),
    }
}

struct ViewState {
    filters: FilterState,
    sort: SortKey,
    compare_ids: Option<Vec<String>>,
}

fn view_state(view: &ViewArgs) -> Result<ViewState, SearchError> {
    let filters = FilterState::from_options(
        view.stops.as_deref(),
        view.airlines.as_deref(),
        view.max_price,
        view.min_duration,
        view.max_duration,
    )?;
    let sort = view
        .sort
        .as_deref()
        .map(SortKey::from_str_loose)
        .transpose()?
        .unwrap_or_default();
    let compare_ids = view.compare.as_deref().map(parse_compare_ids).transpose()?;
    Ok(ViewState {
        filters,
        sort,
        compare_ids,
    })
}

fn apply_top(report: &mut Report, top: Option<usize>) {
    if let Some(n) = top {
        report.flights.truncate(n);
    }
}

fn respond(
    flights: &[NormalizedFlight],
    state: &ViewState,
    top: Option<usize>,
) -> Result<CallToolResult, McpError> {
    if let Some(ref ids) = state.compare_ids {
        return match compare(flights, ids) {
            Ok(comparison) => json_result(&comparison),
            Err(e) => tool_error(e.to_string()),
        };
    }
    let mut report = analyze(flights, &state.filters, state.sort);
    apply_top(&mut report, top);
    json_result(&report)
}

#[derive(Debug, Clone)]
struct SkyboundMcp {
    client: ProviderClient,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SkyboundMcp {
    fn new(client: ProviderClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the flight provider and return an analysis as JSON: matching flights sorted as requested, a duration/price histogram, the cheapest, fastest and best-value flight ids, available carriers and a price ceiling. Requires SKYBOUND_API_KEY and SKYBOUND_API_SECRET in the server environment."
    )]
    async fn skybound_search(
        &self,
        Parameters(args): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        let state = match view_state(&args.view) {
            Ok(v) => v,
            Err(e) => return tool_error(e.to_string()),
        };

        let criteria = SearchCriteria {
            origin: args.from.trim().to_uppercase(),
            destination: args.to.trim().to_uppercase(),
            departure_date: args.date,
            return_date: args.return_date,
            adults: args.adults.unwrap_or(1),
        };
        if let Err(e) = criteria.validate() {
            return tool_error(e.to_string());
        }

        let limit = args.limit.unwrap_or(DEFAULT_LIMIT);
        match crate::search(&self.client, &criteria, &state.filters, limit).await {
            Ok(flights) => respond(&flights, &state, args.view.top),
            Err(e) => tool_error(e.to_string()),
        }
    }

    #[tool(
        description = "Analyze raw flight offers you already have (for example a saved provider response). Returns the same JSON analysis as skybound_search without any network access."
    )]
    async fn skybound_analyze(
        &self,
        Parameters(args): Parameters<AnalyzeArgs>,
    ) -> Result<CallToolResult, McpError> {
        let state = match view_state(&args.view) {
            Ok(v) => v,
            Err(e) => return tool_error(e.to_string()),
        };

        let offers = match offers_from_value(args.offers) {
            Ok(o) => o,
            Err(e) => return tool_error(e.to_string()),
        };

        respond(&normalize(&offers), &state, args.view.top)
    }

    #[tool(
        description = "Look up airport and city IATA codes by name fragment. Use this to find codes for skybound_search."
    )]
    async fn skybound_locations(
        &self,
        Parameters(args): Parameters<LocationsArgs>,
    ) -> Result<CallToolResult, McpError> {
        let locations = self.client.search_locations(&args.keyword).await;
        json_result(&locations)
    }
}

#[tool_handler]
impl ServerHandler for SkyboundMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "skybound".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Flight offer analytics. Workflow: (1) skybound_locations to resolve airport codes if needed. (2) skybound_search to fetch and rank flights, or skybound_analyze for offers you already have. Narrow results by passing stops, airlines, max_price or a duration window taken from a histogram bucket's min_minutes/max_minutes.".into(),
            ),
        }
    }
}

pub async fn run() {
    let client = match ProviderClient::new(ProviderConfig::from_env()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    let service = SkyboundMcp::new(client)
        .serve(rmcp::transport::stdio())
        .await
        .expect("failed to start MCP server");
    service.waiting().await.expect("MCP server error");
}
