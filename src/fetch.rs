use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::{debug, info, warn};
use wreq::Client;

use crate::error::{self, SearchError};
use crate::filter::FilterState;
use crate::model::LocationSuggestion;
use crate::offer::{self, RawOffer};
use crate::query::SearchCriteria;
use crate::token::{AccessToken, TokenCache};

pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MIN_KEYWORD_LEN: usize = 2;

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const OFFERS_PATH: &str = "/v2/shopping/flight-offers";
const LOCATIONS_PATH: &str = "/v1/reference-data/locations";

#[derive(Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub timeout: u64,
    pub proxy: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_secret: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            proxy: None,
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            base_url: non_empty("SKYBOUND_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: non_empty("SKYBOUND_API_KEY"),
            api_secret: non_empty("SKYBOUND_API_SECRET"),
            timeout: non_empty("SKYBOUND_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            proxy: non_empty("SKYBOUND_PROXY"),
        }
    }

    fn credentials(&self) -> Result<(&str, &str), SearchError> {
        match (self.api_key.as_deref(), self.api_secret.as_deref()) {
            (Some(key), Some(secret)) => Ok((key, secret)),
            _ => Err(SearchError::MissingCredentials),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct ProviderErrors {
    #[serde(default)]
    errors: Vec<ProviderErrorEntry>,
}

#[derive(Deserialize)]
struct ProviderErrorEntry {
    detail: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct LocationsResponse {
    #[serde(default)]
    data: Vec<LocationSuggestion>,
}

fn provider_detail(body: &str) -> Option<String> {
    let parsed: ProviderErrors = serde_json::from_str(body).ok()?;
    let first = parsed.errors.into_iter().next()?;
    first.detail.or(first.title).filter(|d| !d.is_empty())
}

fn check_status(status: u16, body: &str) -> Result<(), SearchError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(SearchError::Unauthorized(status)),
        429 => Err(SearchError::RateLimited),
        _ => Err(provider_detail(body)
            .map(SearchError::Provider)
            .unwrap_or(SearchError::HttpStatus(status))),
    }
}

/// Client for an Amadeus-style self-service API. Cheap to clone; clones share
/// the HTTP connection pool and the token cache.
#[derive(Clone)]
pub struct ProviderClient {
    config: ProviderConfig,
    http: Client,
    tokens: Arc<TokenCache>,
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Result<Self, SearchError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout));

        if let Some(ref proxy) = config.proxy {
            builder = builder.proxy(wreq::Proxy::all(proxy).map_err(error::from_http_error)?);
        }

        let http = builder.build().map_err(error::from_http_error)?;

        Ok(Self {
            config,
            http,
            tokens: Arc::new(TokenCache::default()),
        })
    }

    async fn request_token(&self) -> Result<AccessToken, SearchError> {
        let (key, secret) = self.config.credentials()?;
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", key),
            ("client_secret", secret),
        ];

        let issued_at = Instant::now();
        let response = self
            .http
            .post(self.config.url(TOKEN_PATH))
            .form(&form)
            .send()
            .await
            .map_err(error::from_http_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(error::from_http_error)?;
        check_status(status, &body)?;

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::ResponseParse(e.to_string()))?;
        debug!(expires_in = token.expires_in, "obtained access token");
        Ok(AccessToken::new(token.access_token, token.expires_in, issued_at))
    }

    async fn access_token(&self) -> Result<String, SearchError> {
        self.tokens.get_or_refresh(|| self.request_token()).await
    }

    async fn get(&self, path: &str, params: &[(String, String)]) -> Result<String, SearchError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(self.config.url(path))
            .query(params)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .map_err(error::from_http_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(error::from_http_error)?;
        if status == 401 {
            self.tokens.invalidate().await;
        }
        check_status(status, &body)?;
        Ok(body)
    }

    /// Fetches up to `limit` priced offers for `criteria`. Criteria are
    /// validated before any request is made.
    pub async fn fetch_offers(
        &self,
        criteria: &SearchCriteria,
        filters: Option<&FilterState>,
        limit: usize,
    ) -> Result<Vec<RawOffer>, SearchError> {
        criteria.validate()?;
        let params = criteria.to_query_params(filters, limit);
        debug!(?params, "requesting flight offers");

        let body = self.get(OFFERS_PATH, &params).await?;
        let document: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| SearchError::ResponseParse(e.to_string()))?;
        let offers = offer::offers_from_value(document)
            .map_err(|e| SearchError::ResponseParse(e.to_string()))?;

        info!(
            origin = %criteria.origin,
            destination = %criteria.destination,
            count = offers.len(),
            "received flight offers"
        );
        Ok(offers)
    }

    /// Airport and city suggestions for a partial name or code. Lookups are
    /// best-effort: short keywords and failures both yield an empty list.
    pub async fn search_locations(&self, keyword: &str) -> Vec<LocationSuggestion> {
        let keyword = keyword.trim();
        if keyword.chars().count() < MIN_KEYWORD_LEN {
            return Vec::new();
        }

        let params = [
            ("subType".to_string(), "CITY,AIRPORT".to_string()),
            ("keyword".to_string(), keyword.to_string()),
            ("view".to_string(), "LIGHT".to_string()),
        ];

        let result = self.get(LOCATIONS_PATH, &params).await.and_then(|body| {
            serde_json::from_str::<LocationsResponse>(&body)
                .map_err(|e| SearchError::ResponseParse(e.to_string()))
        });

        match result {
            Ok(response) => response.data,
            Err(e) => {
                warn!(keyword, "location search failed: {e}");
                Vec::new()
            }
        }
    }
}
