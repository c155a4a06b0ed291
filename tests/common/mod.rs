#![allow(dead_code)]

use skybound::model::{FlightLeg, NormalizedFlight};

pub fn leg(carrier: &str, minutes: u32, stops: u32) -> FlightLeg {
    FlightLeg {
        carrier_code: carrier.into(),
        carrier_name: carrier.into(),
        departure_time: "2026-03-01T10:00:00".into(),
        arrival_time: "2026-03-01T18:00:00".into(),
        duration: format!("{}h{}m", minutes / 60, minutes % 60),
        duration_minutes: minutes,
        stops,
        origin: "JFK".into(),
        destination: "LHR".into(),
    }
}

pub fn one_way(id: &str, price: f64, minutes: u32) -> NormalizedFlight {
    NormalizedFlight {
        id: id.into(),
        price,
        currency: "USD".into(),
        outbound: leg("BA", minutes, 0),
        return_leg: None,
    }
}

pub fn round_trip(id: &str, price: f64, outbound: FlightLeg, back: FlightLeg) -> NormalizedFlight {
    NormalizedFlight {
        id: id.into(),
        price,
        currency: "USD".into(),
        outbound,
        return_leg: Some(back),
    }
}

pub fn departing(id: &str, at: &str) -> NormalizedFlight {
    let mut flight = one_way(id, 100.0, 120);
    flight.outbound.departure_time = at.into();
    flight
}

pub fn ids(flights: &[NormalizedFlight]) -> Vec<&str> {
    flights.iter().map(|f| f.id.as_str()).collect()
}

/// f1 $500 300m, f2 $420 360m, f3 $420 240m.
pub fn three_flights() -> Vec<NormalizedFlight> {
    vec![
        one_way("f1", 500.0, 300),
        one_way("f2", 420.0, 360),
        one_way("f3", 420.0, 240),
    ]
}
