mod common;

use common::{ids, leg, one_way, round_trip, three_flights};
use skybound::compare::{compare, parse_compare_ids};
use skybound::error::SearchError;

fn pair(a: &str, b: &str) -> Vec<String> {
    vec![a.to_string(), b.to_string()]
}

#[test]
fn picks_flights_in_requested_order() {
    let comparison = compare(&three_flights(), &pair("f3", "f1")).unwrap();
    assert_eq!(ids(&comparison.flights), vec!["f3", "f1"]);
}

#[test]
fn unknown_id_is_a_validation_error() {
    let err = compare(&three_flights(), &pair("f1", "nope")).unwrap_err();
    assert!(matches!(err, SearchError::Validation(ref msg) if msg.contains("nope")));
}

#[test]
fn one_way_and_round_trip_compare() {
    let flights = vec![
        one_way("ow", 300.0, 400),
        round_trip("rt", 650.0, leg("AA", 420, 0), leg("AA", 450, 1)),
    ];
    let comparison = compare(&flights, &parse_compare_ids("ow,rt").unwrap()).unwrap();
    assert!(comparison.flights[0].return_leg.is_none());
    assert!(comparison.flights[1].return_leg.is_some());
}

#[test]
fn comparison_serializes_flights() {
    let comparison = compare(&three_flights(), &pair("f1", "f2")).unwrap();
    let value = serde_json::to_value(&comparison).unwrap();
    assert_eq!(value["flights"][1]["price"], 420.0);
}
