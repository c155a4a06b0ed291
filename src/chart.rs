//! Duration/price histogram.
//!
//! Flights are partitioned by outbound duration into [`BUCKET_COUNT`] equal
//! buckets spanning the observed range, each at least
//! [`MIN_BUCKET_MINUTES`] wide. Only buckets that received a flight are
//! emitted, so consumers must not assume a contiguous series.

use crate::duration::bucket_label;
use crate::model::{ChartBucket, NormalizedFlight};

pub const BUCKET_COUNT: usize = 7;
pub const MIN_BUCKET_MINUTES: u32 = 30;

// The observed span is split into this many intervals; the seventh bucket
// starts at the maximum and catches it.
const SPAN_DIVISIONS: u32 = 6;

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    count: usize,
    total: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn add(&mut self, price: f64) {
        if self.count == 0 {
            self.min = price;
            self.max = price;
        } else {
            self.min = self.min.min(price);
            self.max = self.max.max(price);
        }
        self.total += price;
        self.count += 1;
    }
}

pub fn bucket_size(min_minutes: u32, max_minutes: u32) -> u32 {
    MIN_BUCKET_MINUTES.max((max_minutes - min_minutes).div_ceil(SPAN_DIVISIONS))
}

/// Index of the greatest bucket start not exceeding `minutes`.
fn bucket_index(minutes: u32, min_minutes: u32, size: u32) -> usize {
    let offset = ((minutes - min_minutes) / size) as usize;
    offset.min(BUCKET_COUNT - 1)
}

pub fn build_chart(flights: &[NormalizedFlight]) -> Vec<ChartBucket> {
    let durations = flights.iter().map(|f| f.outbound.duration_minutes);
    let (Some(min_dur), Some(max_dur)) = (durations.clone().min(), durations.max()) else {
        return Vec::new();
    };
    let size = bucket_size(min_dur, max_dur);

    let mut buckets = [Accumulator::default(); BUCKET_COUNT];
    for flight in flights {
        let idx = bucket_index(flight.outbound.duration_minutes, min_dur, size);
        buckets[idx].add(flight.price);
    }

    buckets
        .iter()
        .enumerate()
        .filter(|(_, acc)| acc.count > 0)
        .map(|(i, acc)| {
            let start = min_dur.saturating_add(size.saturating_mul(i as u32));
            ChartBucket {
                label: bucket_label(start),
                min_minutes: start,
                max_minutes: start.saturating_add(size),
                average_price: (acc.total / acc.count as f64).round() as u64,
                min_price: acc.min,
                max_price: acc.max,
                count: acc.count,
            }
        })
        .collect()
}
