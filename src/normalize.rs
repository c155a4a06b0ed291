use tracing::warn;

use crate::carriers::carrier_name;
use crate::duration::{display_duration, parse_duration};
use crate::error::SearchError;
use crate::model::{FlightLeg, NormalizedFlight};
use crate::offer::{RawItinerary, RawOffer};

fn non_blank(code: Option<&str>) -> Option<&str> {
    code.map(str::trim).filter(|c| !c.is_empty())
}

fn parse_price(id: &str, total: &str) -> Result<f64, SearchError> {
    let price: f64 = total
        .trim()
        .parse()
        .map_err(|_| SearchError::malformed(id, format!("unparseable price \"{total}\"")))?;
    if !price.is_finite() || price < 0.0 {
        return Err(SearchError::malformed(
            id,
            format!("price \"{total}\" is not a finite non-negative amount"),
        ));
    }
    // Folds "-0" into +0 so it ties with "0" under total ordering.
    Ok(price + 0.0)
}

fn build_leg(
    id: &str,
    index: usize,
    itinerary: &RawItinerary,
    validating_carrier: Option<&str>,
) -> Result<FlightLeg, SearchError> {
    let (first, last) = match (itinerary.segments.first(), itinerary.segments.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(SearchError::malformed(
                id,
                format!("itinerary {index} has no segments"),
            ))
        }
    };

    let carrier_code = non_blank(first.carrier_code.as_deref())
        .or(validating_carrier)
        .ok_or_else(|| {
            SearchError::malformed(id, format!("itinerary {index} has no carrier"))
        })?
        .to_string();

    Ok(FlightLeg {
        carrier_name: carrier_name(&carrier_code).to_string(),
        carrier_code,
        departure_time: first.departure.at.clone(),
        arrival_time: last.arrival.at.clone(),
        duration: display_duration(&itinerary.duration),
        duration_minutes: parse_duration(&itinerary.duration),
        stops: (itinerary.segments.len() - 1) as u32,
        origin: first.departure.iata_code.clone(),
        destination: last.arrival.iata_code.clone(),
    })
}

/// Maps a single provider offer onto the canonical flight record.
///
/// The first itinerary becomes the outbound leg and the second, when present,
/// the return leg. Further itineraries are ignored.
pub fn normalize_offer(offer: &RawOffer) -> Result<NormalizedFlight, SearchError> {
    let validating = non_blank(offer.validating_airline_codes.first().map(String::as_str));

    let outbound_itinerary = offer
        .itineraries
        .first()
        .ok_or_else(|| SearchError::malformed(&offer.id, "offer has no itineraries"))?;
    let outbound = build_leg(&offer.id, 0, outbound_itinerary, validating)?;

    let return_leg = offer
        .itineraries
        .get(1)
        .map(|it| build_leg(&offer.id, 1, it, validating))
        .transpose()?;

    Ok(NormalizedFlight {
        id: offer.id.clone(),
        price: parse_price(&offer.id, &offer.price.total)?,
        currency: offer.price.currency.clone(),
        outbound,
        return_leg,
    })
}

/// Normalizes a result set, preserving order. Offers that break the provider
/// contract are logged and skipped.
pub fn normalize(offers: &[RawOffer]) -> Vec<NormalizedFlight> {
    offers
        .iter()
        .filter_map(|offer| match normalize_offer(offer) {
            Ok(flight) => Some(flight),
            Err(e) => {
                warn!(offer_id = %offer.id, "skipping {e}");
                None
            }
        })
        .collect()
}
