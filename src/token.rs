use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::SearchError;

/// Seconds shaved off the provider's advertised lifetime so a token is never
/// presented right as it expires.
pub const EXPIRY_MARGIN_SECS: u64 = 60;

#[derive(Clone)]
pub struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_in_secs: u64, issued_at: Instant) -> Self {
        let lifetime = Duration::from_secs(expires_in_secs.saturating_sub(EXPIRY_MARGIN_SECS));
        Self {
            value: value.into(),
            expires_at: issued_at + lifetime,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Holds at most one bearer token.
///
/// The lock is held across a refresh, so concurrent callers that find the
/// cache empty or stale wait for the one in-flight refresh instead of each
/// requesting their own token.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<AccessToken>>,
}

impl TokenCache {
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<String, SearchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AccessToken, SearchError>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(token) = slot.as_ref().filter(|t| t.is_valid_at(Instant::now())) {
            return Ok(token.value.clone());
        }

        debug!("access token missing or expired, refreshing");
        let token = refresh().await?;
        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }
}
