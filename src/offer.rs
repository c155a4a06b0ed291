//! Raw flight offers as delivered by the provider's shopping API.
//!
//! Only the fields the normalizer reads are modelled; everything else in the
//! provider payload is ignored on deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::SearchError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub iata_code: String,
    pub at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    pub departure: Endpoint,
    pub arrival: Endpoint,
    #[serde(default)]
    pub carrier_code: Option<String>,
    #[serde(default)]
    pub number_of_stops: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItinerary {
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrice {
    pub total: String,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    pub id: String,
    #[serde(default)]
    pub itineraries: Vec<RawItinerary>,
    pub price: RawPrice,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OffersDocument {
    Bare(Vec<Value>),
    Envelope {
        #[serde(default)]
        data: Vec<Value>,
    },
}

/// Reads offers from either a bare JSON array or the provider's
/// `{"data": [...]}` response envelope.
pub fn parse_offers(json: &str) -> Result<Vec<RawOffer>, SearchError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| SearchError::InvalidInput(e.to_string()))?;
    offers_from_value(value)
}

/// Like [`parse_offers`], for an already parsed document. Entries that do not
/// decode as an offer are logged and skipped; only a document of the wrong
/// shape is an error.
pub fn offers_from_value(value: Value) -> Result<Vec<RawOffer>, SearchError> {
    let doc: OffersDocument =
        serde_json::from_value(value).map_err(|e| SearchError::InvalidInput(e.to_string()))?;
    let entries = match doc {
        OffersDocument::Bare(entries) => entries,
        OffersDocument::Envelope { data } => data,
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<RawOffer>(entry) {
            Ok(offer) => Some(offer),
            Err(e) => {
                warn!(index, "skipping undecodable offer: {e}");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFER: &str = r#"{
        "type": "flight-offer",
        "id": "1",
        "itineraries": [{
            "duration": "PT7H10M",
            "segments": [{
                "departure": {"iataCode": "JFK", "terminal": "7", "at": "2026-04-01T18:30:00"},
                "arrival": {"iataCode": "LHR", "at": "2026-04-02T06:40:00"},
                "carrierCode": "BA",
                "number": "178",
                "numberOfStops": 0
            }]
        }],
        "price": {"currency": "USD", "total": "612.40", "base": "420.00"},
        "validatingAirlineCodes": ["BA"]
    }"#;

    #[test]
    fn decodes_bare_array() {
        let offers = parse_offers(&format!("[{OFFER}]")).unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].id, "1");
        assert_eq!(offers[0].price.total, "612.40");
        let seg = &offers[0].itineraries[0].segments[0];
        assert_eq!(seg.carrier_code.as_deref(), Some("BA"));
        assert_eq!(seg.departure.iata_code, "JFK");
    }

    #[test]
    fn decodes_envelope() {
        let json = format!(r#"{{"meta": {{"count": 1}}, "data": [{OFFER}]}}"#);
        assert_eq!(parse_offers(&json).unwrap().len(), 1);
    }

    #[test]
    fn envelope_without_data_is_empty() {
        assert!(parse_offers(r#"{"errors": []}"#).unwrap().is_empty());
    }

    #[test]
    fn undecodable_entries_are_skipped() {
        let json = format!(r#"[{{"id": "broken"}}, {OFFER}]"#);
        let offers = parse_offers(&json).unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].id, "1");
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            parse_offers("not json"),
            Err(SearchError::InvalidInput(_))
        ));
        assert!(parse_offers("42").is_err());
    }
}
