mod common;

use common::{ids, leg, one_way, round_trip, three_flights};
use skybound::filter::{
    available_carriers, filter_flights, price_ceiling, stop_bucket, FilterState,
    DEFAULT_PRICE_CEILING,
};
use skybound::model::{DurationRange, NormalizedFlight};

fn with_stops(id: &str, stops: u32) -> NormalizedFlight {
    let mut f = one_way(id, 100.0, 300);
    f.outbound.stops = stops;
    f
}

fn stops_filter(stops: &str) -> FilterState {
    FilterState::from_options(Some(stops), None, None, None, None).unwrap()
}

#[test]
fn default_state_keeps_everything_in_order() {
    let flights = three_flights();
    assert_eq!(filter_flights(&flights, &FilterState::default()), flights);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(filter_flights(&[], &stops_filter("0")).is_empty());
}

#[test]
fn result_is_an_ordered_subsequence() {
    let flights = vec![
        with_stops("a", 1),
        with_stops("b", 0),
        with_stops("c", 1),
        with_stops("d", 2),
        with_stops("e", 1),
    ];
    assert_eq!(ids(&filter_flights(&flights, &stops_filter("1"))), vec!["a", "c", "e"]);
}

#[test]
fn adding_a_constraint_never_grows_the_result() {
    let flights = vec![
        with_stops("a", 0),
        with_stops("b", 1),
        with_stops("c", 3),
    ];
    let loose = stops_filter("0,1");
    let mut tight = loose.clone();
    tight.max_price = 50.0;
    assert!(filter_flights(&flights, &tight).len() <= filter_flights(&flights, &loose).len());
}

#[test]
fn two_or_more_stops_share_a_bucket() {
    let flights = vec![with_stops("two", 2), with_stops("three", 3), with_stops("one", 1)];
    assert_eq!(ids(&filter_flights(&flights, &stops_filter("2"))), vec!["two", "three"]);
}

#[test]
fn round_trip_counts_its_worse_leg() {
    let rt = round_trip("rt", 700.0, leg("BA", 420, 0), leg("BA", 500, 1));
    assert_eq!(stop_bucket(&rt), 1);

    let flights = vec![rt];
    assert_eq!(filter_flights(&flights, &stops_filter("1")).len(), 1);
    assert!(filter_flights(&flights, &stops_filter("0")).is_empty());
}

#[test]
fn round_trip_direct_out_two_stop_back_is_two_stop() {
    let rt = round_trip("rt", 700.0, leg("BA", 420, 0), leg("BA", 600, 2));
    assert_eq!(stop_bucket(&rt), 2);

    let flights = vec![rt];
    assert_eq!(filter_flights(&flights, &stops_filter("2")).len(), 1);
    assert!(filter_flights(&flights, &stops_filter("0")).is_empty());
}

#[test]
fn adding_a_stop_value_never_shrinks_the_result() {
    let flights = vec![
        with_stops("a", 0),
        with_stops("b", 1),
        with_stops("c", 2),
        with_stops("d", 4),
        round_trip("rt", 500.0, leg("BA", 300, 0), leg("BA", 300, 1)),
    ];
    let direct = filter_flights(&flights, &stops_filter("0"));
    let up_to_one = filter_flights(&flights, &stops_filter("0,1"));
    let any = filter_flights(&flights, &stops_filter("0,1,2"));

    assert_eq!(ids(&direct), vec!["a"]);
    assert_eq!(ids(&up_to_one), vec!["a", "b", "rt"]);
    assert_eq!(ids(&any), vec!["a", "b", "c", "d", "rt"]);
    for flight in &direct {
        assert!(up_to_one.contains(flight));
    }
    for flight in &up_to_one {
        assert!(any.contains(flight));
    }
}

#[test]
fn stop_set_is_a_union() {
    let flights = vec![with_stops("a", 0), with_stops("b", 1), with_stops("c", 2)];
    assert_eq!(ids(&filter_flights(&flights, &stops_filter("0,2"))), vec!["a", "c"]);
}

#[test]
fn carrier_matches_on_either_leg() {
    let flights = vec![
        round_trip("out", 500.0, leg("AA", 400, 0), leg("DL", 400, 0)),
        round_trip("back", 500.0, leg("DL", 400, 0), leg("AA", 400, 0)),
        round_trip("none", 500.0, leg("DL", 400, 0), leg("UA", 400, 0)),
    ];
    let filters = FilterState::from_options(None, Some("aa"), None, None, None).unwrap();
    assert_eq!(ids(&filter_flights(&flights, &filters)), vec!["out", "back"]);
}

#[test]
fn carrier_set_is_a_union() {
    let mut a = one_way("a", 100.0, 100);
    a.outbound.carrier_code = "AF".into();
    let mut b = one_way("b", 100.0, 100);
    b.outbound.carrier_code = "LH".into();
    let mut c = one_way("c", 100.0, 100);
    c.outbound.carrier_code = "UA".into();
    let filters = FilterState::from_options(None, Some("LH,AF"), None, None, None).unwrap();
    assert_eq!(ids(&filter_flights(&[a, b, c], &filters)), vec!["a", "b"]);
}

#[test]
fn max_price_is_inclusive() {
    let flights = three_flights();
    let filters = FilterState::from_options(None, None, Some(420.0), None, None).unwrap();
    assert_eq!(ids(&filter_flights(&flights, &filters)), vec!["f2", "f3"]);
}

#[test]
fn duration_range_is_half_open() {
    let flights = three_flights();
    let mut filters = FilterState::default();
    filters.duration_range = Some(DurationRange { min: 240, max: 300 });
    assert_eq!(ids(&filter_flights(&flights, &filters)), vec!["f3"]);

    filters.duration_range = Some(DurationRange { min: 240, max: 301 });
    assert_eq!(ids(&filter_flights(&flights, &filters)), vec!["f1", "f3"]);
}

#[test]
fn duration_range_checks_outbound_only() {
    let rt = round_trip("rt", 700.0, leg("BA", 200, 0), leg("BA", 900, 0));
    let mut filters = FilterState::default();
    filters.duration_range = Some(DurationRange { min: 180, max: 240 });
    assert_eq!(filter_flights(&[rt.clone()], &filters).len(), 1);

    filters.duration_range = Some(DurationRange { min: 800, max: 1000 });
    assert!(filter_flights(&[rt], &filters).is_empty());
}

#[test]
fn all_dimensions_combine_with_and() {
    let mut cheap_direct = one_way("cheap_direct", 300.0, 400);
    cheap_direct.outbound.carrier_code = "AA".into();
    let mut cheap_connect = one_way("cheap_connect", 300.0, 400);
    cheap_connect.outbound.carrier_code = "AA".into();
    cheap_connect.outbound.stops = 1;
    let mut pricey_direct = one_way("pricey_direct", 900.0, 400);
    pricey_direct.outbound.carrier_code = "AA".into();

    let filters =
        FilterState::from_options(Some("0"), Some("AA"), Some(500.0), Some(300), Some(500))
            .unwrap();
    let kept = filter_flights(&[cheap_direct, cheap_connect, pricey_direct], &filters);
    assert_eq!(ids(&kept), vec!["cheap_direct"]);
}

#[test]
fn carriers_facet_is_sorted_unique_across_legs() {
    let flights = vec![
        round_trip("a", 500.0, leg("UA", 400, 0), leg("AA", 400, 0)),
        one_way("b", 300.0, 400),
        round_trip("c", 500.0, leg("AA", 400, 0), leg("BA", 400, 0)),
    ];
    assert_eq!(available_carriers(&flights), vec!["AA", "BA", "UA"]);
}

#[test]
fn price_ceiling_rounds_up_the_maximum() {
    let flights = vec![one_way("a", 410.2, 100), one_way("b", 899.01, 100)];
    assert_eq!(price_ceiling(&flights), 900);
    assert_eq!(price_ceiling(&[]), DEFAULT_PRICE_CEILING);
}
