use crate::error::SearchError;
use crate::model::NormalizedFlight;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    Departure,
}

impl SortKey {
    pub fn from_str_loose(s: &str) -> Result<Self, SearchError> {
        match s {
            "price" => Ok(Self::Price),
            "duration" => Ok(Self::Duration),
            "departure" => Ok(Self::Departure),
            _ => Err(SearchError::Validation(format!("invalid sort key: {s}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Duration => "duration",
            Self::Departure => "departure",
        }
    }
}

/// Returns a sorted copy. The sort is stable, so equal keys keep their
/// input order.
pub fn sort_flights(flights: &[NormalizedFlight], key: SortKey) -> Vec<NormalizedFlight> {
    let mut sorted = flights.to_vec();
    match key {
        SortKey::Price => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::Duration => sorted.sort_by_key(|f| f.outbound.duration_minutes),
        // Unparseable timestamps go last.
        SortKey::Departure => sorted.sort_by_cached_key(|f| {
            let at = f.outbound.departure_instant();
            (at.is_none(), at)
        }),
    }
    sorted
}
