//! Mean and median over per-match integer series.
//!
//! Both return `0.0` for an empty series so that a team without matches still
//! serializes a well formed summary.

use common::Summary;

pub fn average(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    // i128 can't overflow for any slice of i64 that fits in memory
    let sum: i128 = values.iter().map(|v| i128::from(*v)).sum();
    sum as f64 / values.len() as f64
}

pub fn median(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
    }
}

pub fn summarize(values: &[i64]) -> Summary {
    Summary {
        average: average(values),
        median: median(values),
    }
}
