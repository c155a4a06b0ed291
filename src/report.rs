use serde::Serialize;

use crate::chart::build_chart;
use crate::filter::{available_carriers, filter_flights, price_ceiling, FilterState};
use crate::guidance::compute_guidance;
use crate::model::{ChartBucket, GuidanceResult, NormalizedFlight};
use crate::sort::{sort_flights, SortKey};

/// Everything a results view needs for one filter/sort state.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total: usize,
    pub matched: usize,
    pub flights: Vec<NormalizedFlight>,
    pub chart: Vec<ChartBucket>,
    pub guidance: GuidanceResult,
    pub carriers: Vec<String>,
    pub price_ceiling: u64,
}

/// Runs the filter, sort, chart and guidance stages over a normalized
/// result set.
///
/// The chart is built from the filtered set with the duration window lifted,
/// so the histogram keeps showing every bucket while one is selected.
/// Guidance is computed over the filtered and sorted flights.
pub fn analyze(flights: &[NormalizedFlight], filters: &FilterState, sort: SortKey) -> Report {
    let matched = sort_flights(&filter_flights(flights, filters), sort);
    let chart = build_chart(&filter_flights(flights, &filters.without_duration_range()));
    let guidance = compute_guidance(&matched);

    Report {
        total: flights.len(),
        matched: matched.len(),
        flights: matched,
        chart,
        guidance,
        carriers: available_carriers(flights),
        price_ceiling: price_ceiling(flights),
    }
}
