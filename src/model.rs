use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightLeg {
    pub carrier_code: String,
    pub carrier_name: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub duration_minutes: u32,
    pub stops: u32,
    pub origin: String,
    pub destination: String,
}

impl FlightLeg {
    pub fn departure_instant(&self) -> Option<NaiveDateTime> {
        parse_instant(&self.departure_time)
    }

    pub fn arrival_instant(&self) -> Option<NaiveDateTime> {
        parse_instant(&self.arrival_time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedFlight {
    pub id: String,
    pub price: f64,
    pub currency: String,
    pub outbound: FlightLeg,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_leg: Option<FlightLeg>,
}

impl NormalizedFlight {
    pub fn is_round_trip(&self) -> bool {
        self.return_leg.is_some()
    }

    pub fn legs(&self) -> impl Iterator<Item = &FlightLeg> {
        std::iter::once(&self.outbound).chain(self.return_leg.as_ref())
    }
}

/// Half-open outbound duration window, `[min, max)` in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationRange {
    pub min: u32,
    pub max: u32,
}

impl DurationRange {
    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.min && minutes < self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBucket {
    pub label: String,
    pub min_minutes: u32,
    pub max_minutes: u32,
    pub average_price: u64,
    pub min_price: f64,
    pub max_price: f64,
    pub count: usize,
}

impl ChartBucket {
    /// The filter window that selects exactly this bucket's flights.
    pub fn duration_range(&self) -> DurationRange {
        DurationRange {
            min: self.min_minutes,
            max: self.max_minutes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GuidanceResult {
    pub cheapest_id: Option<String>,
    pub fastest_id: Option<String>,
    pub best_value_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub city_name: String,
    #[serde(default)]
    pub country_name: String,
}

/// Airport or city returned by the provider's location lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSuggestion {
    pub name: String,
    pub iata_code: String,
    #[serde(default)]
    pub detailed_name: String,
    #[serde(default)]
    pub sub_type: String,
    #[serde(default)]
    pub address: Address,
}

/// Provider timestamps are ISO-8601, usually without an offset
/// (`2026-03-01T10:30:00`). Offset-bearing values are converted to UTC,
/// offset-less ones are taken as written.
pub fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offsetless_timestamps() {
        let t = parse_instant("2026-03-01T10:30:00").unwrap();
        assert_eq!(t.to_string(), "2026-03-01 10:30:00");
        assert!(parse_instant("2026-03-01T10:30").is_some());
    }

    #[test]
    fn offset_timestamps_compare_as_instants() {
        let paris = parse_instant("2026-03-01T10:00:00+01:00").unwrap();
        let utc = parse_instant("2026-03-01T09:30:00Z").unwrap();
        assert!(paris < utc);
    }

    #[test]
    fn garbage_timestamp_is_none() {
        assert!(parse_instant("tomorrow morning").is_none());
        assert!(parse_instant("").is_none());
    }

    #[test]
    fn duration_range_is_half_open() {
        let r = DurationRange { min: 120, max: 180 };
        assert!(r.contains(120));
        assert!(r.contains(179));
        assert!(!r.contains(180));
        assert!(!r.contains(119));
    }
}
