use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(
        "request timed out; the flight provider may be slow or unreachable. \
         Try increasing --timeout or check your connection"
    )]
    Timeout,

    #[error("connection failed, check your internet connection ({0})")]
    ConnectionFailed(String),

    #[error("DNS resolution failed for {0}, check your internet connection")]
    DnsResolution(String),

    #[error("proxy error, check your --proxy URL is correct ({0})")]
    ProxyError(String),

    #[error("TLS/SSL error, connection to the flight provider failed ({0})")]
    TlsError(String),

    #[error(
        "rate limited by the flight provider (HTTP 429); wait a minute before retrying"
    )]
    RateLimited,

    #[error(
        "authentication rejected by the flight provider (HTTP {0}); \
         check SKYBOUND_API_KEY and SKYBOUND_API_SECRET"
    )]
    Unauthorized(u16),

    #[error("unexpected HTTP status {0} from the flight provider")]
    HttpStatus(u16),

    #[error("flight provider error: {0}")]
    Provider(String),

    #[error(
        "failed to decode the flight provider response: {0}. \
         This may indicate an API format change"
    )]
    ResponseParse(String),

    #[error(
        "missing provider credentials; set SKYBOUND_API_KEY and SKYBOUND_API_SECRET \
         or pass --api-key/--api-secret"
    )]
    MissingCredentials,

    #[error(
        "invalid airport code \"{0}\"; must be exactly 3 uppercase letters (e.g. JFK, LHR, CDG)"
    )]
    InvalidAirport(String),

    #[error("invalid date \"{0}\"; must be YYYY-MM-DD format (e.g. 2026-03-01)")]
    InvalidDate(String),

    #[error("{0}")]
    Validation(String),

    #[error("malformed offer \"{id}\": {reason}")]
    MalformedOffer { id: String, reason: String },

    #[error("invalid offers input: {0}")]
    InvalidInput(String),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    pub fn malformed(id: &str, reason: impl Into<String>) -> Self {
        Self::MalformedOffer {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

pub fn from_http_error(err: wreq::Error) -> SearchError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();

    if err.is_timeout() {
        return SearchError::Timeout;
    }

    if err.is_connect() {
        if lower.contains("dns") || lower.contains("resolve") || lower.contains("getaddrinfo") {
            return SearchError::DnsResolution(msg);
        }
        return SearchError::ConnectionFailed(msg);
    }

    if lower.contains("proxy") || lower.contains("socks") {
        return SearchError::ProxyError(msg);
    }

    if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
        return SearchError::TlsError(msg);
    }

    if lower.contains("builder error") && lower.contains("uri") {
        return SearchError::ProxyError(msg);
    }

    SearchError::ConnectionFailed(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_names_offer_and_reason() {
        let err = SearchError::malformed("17", "itinerary 1 has no segments");
        assert_eq!(
            err.to_string(),
            "malformed offer \"17\": itinerary 1 has no segments"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "offers.json");
        let err: SearchError = io.into();
        assert!(matches!(err, SearchError::Io(_)));
        assert!(err.to_string().contains("offers.json"));
    }
}
