pub mod carriers;
pub mod chart;
pub mod compare;
pub mod duration;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod guidance;
pub mod mcp;
pub mod model;
pub mod normalize;
pub mod offer;
pub mod page;
pub mod query;
pub mod report;
pub mod sort;
pub mod table;
pub mod token;

use error::SearchError;
use fetch::ProviderClient;
use filter::FilterState;
use model::NormalizedFlight;
use query::SearchCriteria;

/// Fetches offers for `criteria` and normalizes them. Stop and carrier
/// filters are forwarded to the provider; everything else is applied locally
/// by [`report::analyze`].
pub async fn search(
    client: &ProviderClient,
    criteria: &SearchCriteria,
    filters: &FilterState,
    limit: usize,
) -> Result<Vec<NormalizedFlight>, SearchError> {
    let offers = client.fetch_offers(criteria, Some(filters), limit).await?;
    Ok(normalize::normalize(&offers))
}
