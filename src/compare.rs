//! Side-by-side comparison of two chosen flights.

use serde::Serialize;

use crate::error::SearchError;
use crate::model::NormalizedFlight;

/// Number of flights a comparison holds.
pub const COMPARE_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub flights: Vec<NormalizedFlight>,
}

/// Parses `ID1,ID2`. Exactly two distinct, non-blank ids are required.
pub fn parse_compare_ids(s: &str) -> Result<Vec<String>, SearchError> {
    let ids: Vec<String> = s
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.len() != COMPARE_COUNT || ids[0] == ids[1] {
        return Err(SearchError::Validation(format!(
            "invalid comparison \"{s}\"; give two different flight ids, e.g. --compare 3,7"
        )));
    }
    Ok(ids)
}

/// Picks the flights named by `ids` from the full result set, in the order
/// the ids were given. Filters do not apply, so any flight in the results can
/// be compared.
pub fn compare(flights: &[NormalizedFlight], ids: &[String]) -> Result<Comparison, SearchError> {
    let picked = ids
        .iter()
        .map(|id| {
            flights
                .iter()
                .find(|f| &f.id == id)
                .cloned()
                .ok_or_else(|| {
                    SearchError::Validation(format!("unknown flight id \"{id}\" in comparison"))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Comparison { flights: picked })
}
