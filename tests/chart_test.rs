mod common;

use common::{one_way, three_flights};
use skybound::chart::{build_chart, BUCKET_COUNT, MIN_BUCKET_MINUTES};
use skybound::filter::{filter_flights, FilterState};
use skybound::model::NormalizedFlight;

fn spread(durations: &[u32]) -> Vec<NormalizedFlight> {
    durations
        .iter()
        .enumerate()
        .map(|(i, &m)| one_way(&format!("f{i}"), 100.0 + i as f64, m))
        .collect()
}

#[test]
fn empty_input_yields_no_buckets() {
    assert!(build_chart(&[]).is_empty());
}

#[test]
fn every_flight_lands_in_exactly_one_bucket() {
    let flights = spread(&[95, 130, 250, 251, 400, 610, 777, 777, 1200]);
    let chart = build_chart(&flights);
    let total: usize = chart.iter().map(|b| b.count).sum();
    assert_eq!(total, flights.len());

    for flight in &flights {
        let minutes = flight.outbound.duration_minutes;
        let holding = chart
            .iter()
            .filter(|b| b.min_minutes <= minutes && minutes < b.max_minutes)
            .count();
        assert_eq!(holding, 1, "{minutes} min");
    }
}

#[test]
fn buckets_are_ascending_and_bounded() {
    let chart = build_chart(&spread(&[60, 200, 340, 480, 620, 760, 900]));
    assert!(chart.len() <= BUCKET_COUNT);
    for pair in chart.windows(2) {
        assert!(pair[0].max_minutes <= pair[1].min_minutes);
    }
    for bucket in &chart {
        assert!(bucket.count > 0);
        assert!(bucket.min_price <= bucket.max_price);
        assert!(bucket.max_minutes - bucket.min_minutes >= MIN_BUCKET_MINUTES);
    }
}

#[test]
fn wide_span_uses_all_seven_buckets() {
    // span 600, size 100
    let chart = build_chart(&spread(&[0, 100, 200, 300, 400, 500, 600]));
    assert_eq!(chart.len(), 7);
    let starts: Vec<u32> = chart.iter().map(|b| b.min_minutes).collect();
    assert_eq!(starts, vec![0, 100, 200, 300, 400, 500, 600]);
    assert_eq!(chart[6].max_minutes, 700);
}

#[test]
fn narrow_span_uses_minimum_width() {
    let chart = build_chart(&spread(&[300, 310, 340]));
    assert_eq!(chart.len(), 2);
    assert_eq!((chart[0].min_minutes, chart[0].max_minutes), (300, 330));
    assert_eq!(chart[0].count, 2);
    assert_eq!((chart[1].min_minutes, chart[1].max_minutes), (330, 360));
}

#[test]
fn single_duration_makes_one_bucket() {
    let chart = build_chart(&spread(&[420, 420]));
    assert_eq!(chart.len(), 1);
    assert_eq!(chart[0].min_minutes, 420);
    assert_eq!(chart[0].max_minutes, 450);
    assert_eq!(chart[0].label, "7h");
}

#[test]
fn empty_buckets_are_omitted() {
    // size 100; nothing between 100 and 500
    let chart = build_chart(&spread(&[0, 50, 600]));
    let starts: Vec<u32> = chart.iter().map(|b| b.min_minutes).collect();
    assert_eq!(starts, vec![0, 600]);
}

#[test]
fn bucket_prices_summarize_members() {
    let flights = vec![
        one_way("a", 400.0, 300),
        one_way("b", 401.0, 310),
        one_way("c", 900.0, 500),
    ];
    let chart = build_chart(&flights);
    let first = &chart[0];
    assert_eq!(first.count, 2);
    assert_eq!(first.min_price, 400.0);
    assert_eq!(first.max_price, 401.0);
    // 400.5 rounds half away from zero
    assert_eq!(first.average_price, 401);
}

#[test]
fn labels_follow_bucket_start() {
    // min 150, size 35
    let chart = build_chart(&spread(&[150, 185, 360]));
    let labels: Vec<&str> = chart.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["2h30m", "3h5m", "6h"]);
}

#[test]
fn selecting_a_bucket_filters_to_its_members() {
    let flights = three_flights();
    let chart = build_chart(&flights);
    for bucket in &chart {
        let filters = FilterState {
            duration_range: Some(bucket.duration_range()),
            ..FilterState::default()
        };
        assert_eq!(filter_flights(&flights, &filters).len(), bucket.count);
    }
}
