//! Statistics helpers

use serde::{Deserialize, Serialize};

/// Arithmetic mean, zero for empty input
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of `values`; the mean of the two central values for even lengths
pub fn median(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    } else {
        sorted[n / 2] as f64
    }
}

/// Nearest-rank percentile: the `ceil(p/100 * n)`-th smallest value
pub fn percentile(values: &[u64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let rank = (p * sorted.len() as f64 / 100.0).ceil() as usize;
    let index = rank.clamp(1, sorted.len()) - 1;
    sorted[index] as f64
}

/// Latency spread of the successful probes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyDistribution {
    pub min_ms: u64,
    pub max_ms: u64,
    pub median_ms: f64,
    pub p95_ms: f64,
}

impl LatencyDistribution {
    pub fn from_latencies(latencies: &[u64]) -> Option<Self> {
        let min_ms = *latencies.iter().min()?;
        let max_ms = *latencies.iter().max()?;
        Some(Self {
            min_ms,
            max_ms,
            median_ms: median(latencies),
            p95_ms: percentile(latencies, 95.0),
        })
    }
}
