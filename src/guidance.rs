use crate::model::{GuidanceResult, NormalizedFlight};

/// Price weighted by outbound hours in the air; lower is better.
pub fn value_score(flight: &NormalizedFlight) -> f64 {
    flight.price * (f64::from(flight.outbound.duration_minutes) / 60.0)
}

/// Picks the cheapest, fastest and best-value flights in one pass.
///
/// Comparisons are strict, so the earliest of several tied flights wins.
pub fn compute_guidance(flights: &[NormalizedFlight]) -> GuidanceResult {
    let Some((first, rest)) = flights.split_first() else {
        return GuidanceResult::default();
    };

    let mut cheapest = first;
    let mut fastest = first;
    let mut best_value = first;
    let mut best_score = value_score(first);

    for flight in rest {
        if flight.price < cheapest.price {
            cheapest = flight;
        }
        if flight.outbound.duration_minutes < fastest.outbound.duration_minutes {
            fastest = flight;
        }
        let score = value_score(flight);
        if score < best_score {
            best_value = flight;
            best_score = score;
        }
    }

    GuidanceResult {
        cheapest_id: Some(cheapest.id.clone()),
        fastest_id: Some(fastest.id.clone()),
        best_value_id: Some(best_value.id.clone()),
    }
}
