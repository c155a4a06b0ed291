use std::collections::BTreeSet;

use crate::error::SearchError;
use crate::model::{DurationRange, FlightLeg, NormalizedFlight};

/// Highest stop bucket; it stands for "this many or more".
pub const MAX_STOP_BUCKET: u32 = 2;

/// Price ceiling reported when there is nothing to derive one from.
pub const DEFAULT_PRICE_CEILING: u64 = 2000;

/// Which flights to show. Empty sets place no restriction on their dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub stops: BTreeSet<u32>,
    pub airlines: BTreeSet<String>,
    pub max_price: f64,
    pub duration_range: Option<DurationRange>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            stops: BTreeSet::new(),
            airlines: BTreeSet::new(),
            max_price: f64::INFINITY,
            duration_range: None,
        }
    }
}

impl FilterState {
    /// Builds a state from loosely typed user input: comma-separated stop
    /// counts and carrier codes, an optional price cap and optional
    /// duration bounds. Missing inputs leave their dimension unrestricted.
    pub fn from_options(
        stops: Option<&str>,
        airlines: Option<&str>,
        max_price: Option<f64>,
        min_duration: Option<u32>,
        max_duration: Option<u32>,
    ) -> Result<Self, SearchError> {
        let mut state = Self::default();

        if let Some(stops) = stops {
            state.stops = parse_stop_list(stops)?;
        }
        if let Some(airlines) = airlines {
            state.airlines = split_codes(airlines).collect();
        }
        if let Some(max_price) = max_price {
            if max_price.is_nan() || max_price < 0.0 {
                return Err(SearchError::Validation(format!(
                    "invalid max price {max_price}; must be zero or more"
                )));
            }
            state.max_price = max_price;
        }

        if min_duration.is_some() || max_duration.is_some() {
            let range = DurationRange {
                min: min_duration.unwrap_or(0),
                max: max_duration.unwrap_or(u32::MAX),
            };
            if range.min >= range.max {
                return Err(SearchError::Validation(format!(
                    "minimum duration ({}) must be below maximum duration ({})",
                    range.min, range.max
                )));
            }
            state.duration_range = Some(range);
        }

        Ok(state)
    }

    /// Same state with the duration window dropped, used as the chart's
    /// context so selecting a bucket does not collapse the histogram.
    pub fn without_duration_range(&self) -> Self {
        Self {
            duration_range: None,
            ..self.clone()
        }
    }

    /// True when only direct flights are requested.
    pub fn is_nonstop_only(&self) -> bool {
        self.stops.len() == 1 && self.stops.contains(&0)
    }

    pub fn matches(&self, flight: &NormalizedFlight) -> bool {
        self.stop_match(flight)
            && self.carrier_match(flight)
            && flight.price <= self.max_price
            && self.duration_match(flight)
    }

    fn stop_match(&self, flight: &NormalizedFlight) -> bool {
        self.stops.is_empty() || self.stops.contains(&stop_bucket(flight))
    }

    fn carrier_match(&self, flight: &NormalizedFlight) -> bool {
        self.airlines.is_empty()
            || flight
                .legs()
                .any(|leg| self.airlines.contains(&leg.carrier_code))
    }

    // Outbound only, even on round trips.
    fn duration_match(&self, flight: &NormalizedFlight) -> bool {
        self.duration_range
            .is_none_or(|range| range.contains(flight.outbound.duration_minutes))
    }
}

fn split_codes(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(',')
        .map(|part| part.trim().to_uppercase())
        .filter(|part| !part.is_empty())
}

pub fn parse_stop_list(s: &str) -> Result<BTreeSet<u32>, SearchError> {
    split_codes(s)
        .map(|part| match part.parse::<u32>() {
            Ok(n) if n <= MAX_STOP_BUCKET => Ok(n),
            _ => Err(SearchError::Validation(format!(
                "invalid stop count \"{part}\"; use 0, 1 or 2 (2 = two or more)"
            ))),
        })
        .collect()
}

fn clamped_stops(leg: &FlightLeg) -> u32 {
    leg.stops.min(MAX_STOP_BUCKET)
}

/// Stop bucket of a whole flight: the worse of its legs.
pub fn stop_bucket(flight: &NormalizedFlight) -> u32 {
    flight.legs().map(clamped_stops).max().unwrap_or(0)
}

pub fn filter_flights(flights: &[NormalizedFlight], state: &FilterState) -> Vec<NormalizedFlight> {
    flights
        .iter()
        .filter(|f| state.matches(f))
        .cloned()
        .collect()
}

/// Sorted, de-duplicated carrier codes across both legs.
pub fn available_carriers(flights: &[NormalizedFlight]) -> Vec<String> {
    flights
        .iter()
        .flat_map(|f| f.legs().map(|leg| leg.carrier_code.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Upper end for a price slider: the highest price rounded up.
pub fn price_ceiling(flights: &[NormalizedFlight]) -> u64 {
    flights
        .iter()
        .map(|f| f.price)
        .reduce(f64::max)
        .map(|p| p.ceil() as u64)
        .unwrap_or(DEFAULT_PRICE_CEILING)
}
