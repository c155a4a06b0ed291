use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use skybound::error::SearchError;
use skybound::compare::{compare, parse_compare_ids};
use skybound::fetch::{ProviderClient, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use skybound::filter::FilterState;
use skybound::model::{GuidanceResult, NormalizedFlight};
use skybound::page::{check_page, page_slice, page_window, total_pages, ITEMS_PER_PAGE};
use skybound::query::{SearchCriteria, DEFAULT_LIMIT};
use skybound::report::{analyze, Report};
use skybound::sort::SortKey;
use skybound::{normalize, offer, table};

#[derive(Parser)]
#[command(
    name = "skybound",
    about = "Search, filter, chart and rank flight offers from the terminal",
    version,
    after_help = "\
Examples:
  skybound search -f JFK -t LHR -d 2026-04-01
  skybound search -f CDG -t JFK -d 2026-05-01 --return-date 2026-05-15 --chart
  skybound search -f JFK -t LHR -d 2026-04-01 --stops 0 --airlines BA,AA --sort duration
  skybound analyze offers.json --max-price 800 --json --pretty
  skybound locations lond"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Search the flight provider and analyze the results",
        long_about = "Fetch offers from the flight provider, then filter, sort, chart and rank them.\n\
            Provider credentials come from --api-key/--api-secret or SKYBOUND_API_KEY/SKYBOUND_API_SECRET.",
        after_help = "\
Examples:
  One-way:      skybound search -f JFK -t LHR -d 2026-04-01
  Round-trip:   skybound search -f CDG -t JFK -d 2026-05-01 --return-date 2026-05-15
  Direct only:  skybound search -f JFK -t LHR -d 2026-04-01 --stops 0
  Histogram:    skybound search -f JFK -t LHR -d 2026-04-01 --chart
  JSON output:  skybound search -f JFK -t LHR -d 2026-04-01 --json --pretty"
    )]
    Search(SearchArgs),
    #[command(
        about = "Analyze raw provider offers from a file or stdin",
        after_help = "\
Examples:
  skybound analyze offers.json
  skybound analyze offers.json --stops 1,2 --min-duration 300 --max-duration 420
  skybound analyze offers.json --compare 3,7
  curl -s ... | skybound analyze --compact --sort departure"
    )]
    Analyze(AnalyzeArgs),
    #[command(about = "Look up airport and city codes")]
    Locations(LocationsArgs),
    #[command(about = "Start MCP server for AI agents (stdio transport)")]
    Mcp,
}

#[derive(clap::Args)]
struct ProviderArgs {
    #[arg(long, env = "SKYBOUND_API_KEY", hide_env_values = true, help = "Provider API key")]
    api_key: Option<String>,

    #[arg(long, env = "SKYBOUND_API_SECRET", hide_env_values = true, help = "Provider API secret")]
    api_secret: Option<String>,

    #[arg(
        long,
        env = "SKYBOUND_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        value_name = "URL",
        help = "Provider API base URL"
    )]
    base_url: String,

    #[arg(long, env = "SKYBOUND_PROXY", value_name = "URL", help = "HTTP or SOCKS5 proxy")]
    proxy: Option<String>,

    #[arg(
        long,
        env = "SKYBOUND_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_name = "SECS",
        help = "Request timeout"
    )]
    timeout: u64,
}

impl ProviderArgs {
    fn config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            timeout: self.timeout,
            proxy: self.proxy.clone(),
        }
    }
}

#[derive(clap::Args)]
struct ViewArgs {
    #[arg(
        long,
        value_name = "0,1,2",
        help = "Stop counts to include (2 = two or more)",
        long_help = "Comma-separated stop counts to include. 2 means two or more. \
            A round trip counts as its worse leg."
    )]
    stops: Option<String>,

    #[arg(
        long,
        value_name = "AA,BA,...",
        help = "Carriers to include (either leg may match)"
    )]
    airlines: Option<String>,

    #[arg(long, value_name = "AMOUNT", help = "Maximum total price")]
    max_price: Option<f64>,

    #[arg(long, value_name = "MIN", help = "Minimum outbound duration in minutes (inclusive)")]
    min_duration: Option<u32>,

    #[arg(long, value_name = "MIN", help = "Maximum outbound duration in minutes (exclusive)")]
    max_duration: Option<u32>,

    #[arg(
        long,
        default_value = "price",
        value_name = "KEY",
        help = "Sort order [price, duration, departure]"
    )]
    sort: String,

    #[arg(long, default_value = "1", value_name = "N", help = "Page to show")]
    page: usize,

    #[arg(
        long,
        default_value_t = ITEMS_PER_PAGE,
        value_name = "N",
        help = "Flights per page (0 = all)"
    )]
    page_size: usize,

    #[arg(
        long,
        value_name = "ID1,ID2",
        help = "Compare two flights side by side instead of listing results"
    )]
    compare: Option<String>,

    #[arg(long, help = "Show the duration/price histogram")]
    chart: bool,

    #[arg(long, help = "One-line-per-flight output (recommended for scripts and AI agents)")]
    compact: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct SearchArgs {
    #[arg(short, long, value_name = "IATA", help = "Departure airport code")]
    from: String,

    #[arg(short, long, value_name = "IATA", help = "Arrival airport code")]
    to: String,

    #[arg(short, long, value_name = "YYYY-MM-DD", help = "Departure date")]
    date: String,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Return date (makes it a round trip)")]
    return_date: Option<String>,

    #[arg(long, default_value = "1", value_name = "N", help = "Number of adult passengers")]
    adults: u32,

    #[arg(
        long,
        default_value_t = DEFAULT_LIMIT,
        value_name = "N",
        help = "Maximum offers to request"
    )]
    limit: usize,

    #[command(flatten)]
    view: ViewArgs,

    #[command(flatten)]
    provider: ProviderArgs,
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    #[arg(value_name = "FILE", help = "Offers JSON (array or {\"data\": [...]}); stdin if omitted")]
    file: Option<PathBuf>,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(clap::Args)]
struct LocationsArgs {
    #[arg(value_name = "KEYWORD", help = "City or airport name fragment (2+ characters)")]
    keyword: String,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[command(flatten)]
    provider: ProviderArgs,
}

#[derive(Serialize)]
struct PagedReport {
    #[serde(flatten)]
    report: Report,
    page: usize,
    total_pages: usize,
}

fn is_json(view: &ViewArgs) -> bool {
    view.json || view.pretty
}

fn error_code(err: &SearchError) -> i32 {
    match err {
        SearchError::InvalidAirport(_)
        | SearchError::InvalidDate(_)
        | SearchError::Validation(_)
        | SearchError::MissingCredentials => 2,
        SearchError::Timeout
        | SearchError::ConnectionFailed(_)
        | SearchError::DnsResolution(_)
        | SearchError::TlsError(_)
        | SearchError::ProxyError(_) => 3,
        SearchError::RateLimited | SearchError::Unauthorized(_) => 4,
        SearchError::HttpStatus(_) | SearchError::Provider(_) => 5,
        SearchError::ResponseParse(_) => 6,
        SearchError::InvalidInput(_) | SearchError::MalformedOffer { .. } | SearchError::Io(_) => 7,
    }
}

fn error_kind(err: &SearchError) -> &'static str {
    match err {
        SearchError::InvalidAirport(_) => "invalid_airport",
        SearchError::InvalidDate(_) => "invalid_date",
        SearchError::Validation(_) => "validation_error",
        SearchError::MissingCredentials => "missing_credentials",
        SearchError::Timeout => "timeout",
        SearchError::ConnectionFailed(_) => "connection_failed",
        SearchError::DnsResolution(_) => "dns_error",
        SearchError::TlsError(_) => "tls_error",
        SearchError::ProxyError(_) => "proxy_error",
        SearchError::RateLimited => "rate_limited",
        SearchError::Unauthorized(_) => "unauthorized",
        SearchError::HttpStatus(_) => "http_error",
        SearchError::Provider(_) => "provider_error",
        SearchError::ResponseParse(_) => "parse_error",
        SearchError::InvalidInput(_) | SearchError::MalformedOffer { .. } => "invalid_input",
        SearchError::Io(_) => "io_error",
    }
}

fn die(err: &SearchError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": error_kind(err),
                "message": err.to_string(),
            }
        });
        println!("{json}");
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SKYBOUND_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_filters(view: &ViewArgs) -> Result<FilterState, SearchError> {
    FilterState::from_options(
        view.stops.as_deref(),
        view.airlines.as_deref(),
        view.max_price,
        view.min_duration,
        view.max_duration,
    )
}

fn currency_of(flights: &[NormalizedFlight]) -> &str {
    flights.first().map(|f| f.currency.as_str()).unwrap_or("USD")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match output {
        Ok(s) => println!("{s}"),
        Err(e) => die(&SearchError::Validation(format!("failed to encode JSON: {e}")), true),
    }
}

fn print_pager(page: usize, pages: usize) {
    let window: Vec<String> = page_window(page, pages)
        .into_iter()
        .map(|p| if p == page { format!("[{p}]") } else { p.to_string() })
        .collect();
    println!("Page {page} of {pages}: {}", window.join(" "));
}

fn print_report(
    report: Report,
    view: &ViewArgs,
    currency: &str,
    empty_message: &str,
) -> Result<(), SearchError> {
    let per_page = if view.page_size == 0 {
        report.flights.len().max(1)
    } else {
        view.page_size
    };
    let pages = total_pages(report.flights.len(), per_page);
    check_page(view.page, pages)?;
    let page_flights = page_slice(&report.flights, view.page, per_page).to_vec();

    if is_json(view) {
        let paged = PagedReport {
            report: Report {
                flights: page_flights,
                ..report
            },
            page: view.page,
            total_pages: pages,
        };
        print_json(&paged, view.pretty);
        return Ok(());
    }

    if report.matched == 0 {
        println!("{empty_message}");
    } else if view.compact {
        for flight in &page_flights {
            println!("{}", table::compact_line(flight, &report.guidance));
        }
    } else {
        println!("{}", table::render(&page_flights, &report.guidance));
        println!(
            "Showing {} of {} matching flights ({} total)",
            page_flights.len(),
            report.matched,
            report.total
        );
        if pages > 1 {
            print_pager(view.page, pages);
        }
    }

    // The chart ignores the duration window, so it is still useful when
    // nothing matches.
    if view.chart && !report.chart.is_empty() {
        println!("{}", table::render_chart(&report.chart, currency));
    }
    Ok(())
}

fn print_comparison(
    flights: &[NormalizedFlight],
    ids: &[String],
    guidance: &GuidanceResult,
    view: &ViewArgs,
) -> Result<(), SearchError> {
    let comparison = compare(flights, ids)?;
    if is_json(view) {
        print_json(&comparison, view.pretty);
    } else {
        println!("{}", table::render_comparison(&comparison, guidance));
    }
    Ok(())
}

fn present(
    flights: &[NormalizedFlight],
    view: &ViewArgs,
    filters: &FilterState,
    sort: SortKey,
    compare_ids: Option<&[String]>,
    empty_message: &str,
) -> Result<(), SearchError> {
    let report = analyze(flights, filters, sort);
    match compare_ids {
        Some(ids) => print_comparison(flights, ids, &report.guidance, view),
        None => print_report(report, view, currency_of(flights), empty_message),
    }
}

async fn run_search(args: &SearchArgs) -> Result<(), SearchError> {
    let filters = build_filters(&args.view)?;
    let sort = SortKey::from_str_loose(&args.view.sort)?;
    let compare_ids = args.view.compare.as_deref().map(parse_compare_ids).transpose()?;

    let criteria = SearchCriteria {
        origin: args.from.trim().to_uppercase(),
        destination: args.to.trim().to_uppercase(),
        departure_date: args.date.clone(),
        return_date: args.return_date.clone(),
        adults: args.adults,
    };
    criteria.validate()?;

    let client = ProviderClient::new(args.provider.config())?;
    let flights = skybound::search(&client, &criteria, &filters, args.limit).await?;

    present(
        &flights,
        &args.view,
        &filters,
        sort,
        compare_ids.as_deref(),
        "No flights found. Try routes like JFK-LHR or CDG-JFK.",
    )
}

fn run_analyze(args: &AnalyzeArgs) -> Result<(), SearchError> {
    let filters = build_filters(&args.view)?;
    let sort = SortKey::from_str_loose(&args.view.sort)?;
    let compare_ids = args.view.compare.as_deref().map(parse_compare_ids).transpose()?;

    let input = match args.file {
        Some(ref path) => std::fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let offers = offer::parse_offers(&input)?;
    let flights = normalize::normalize(&offers);

    present(
        &flights,
        &args.view,
        &filters,
        sort,
        compare_ids.as_deref(),
        "No flights match the current filters.",
    )
}

async fn run_locations(args: &LocationsArgs) -> Result<(), SearchError> {
    let client = ProviderClient::new(args.provider.config())?;
    let locations = client.search_locations(&args.keyword).await;

    if args.json {
        print_json(&locations, false);
    } else if locations.is_empty() {
        println!("No locations found.");
    } else {
        println!("{}", table::render_locations(&locations));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Mcp => skybound::mcp::run().await,
        Commands::Search(args) => {
            if let Err(e) = run_search(&args).await {
                die(&e, is_json(&args.view));
            }
        }
        Commands::Analyze(args) => {
            if let Err(e) = run_analyze(&args) {
                die(&e, is_json(&args.view));
            }
        }
        Commands::Locations(args) => {
            if let Err(e) = run_locations(&args).await {
                die(&e, args.json);
            }
        }
    }
}
