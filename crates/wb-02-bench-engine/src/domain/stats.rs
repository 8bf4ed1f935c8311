//! Statistics reducer.
//!
//! Quartiles are nearest-rank order statistics at zero-based indices
//! `floor(N * 0.25)`, `floor(N / 2)` and `floor(N * 0.75)` of the sorted
//! sample. No interpolation, so every reported quantile is a member of the
//! sample.

use serde::Serialize;

use super::sample::DurationSample;

/// Samples shorter than this are displayed without detail columns.
pub const DETAIL_THRESHOLD: usize = 5;

/// Summary of one workload's per-unit costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation (N - 1). Zero for a single value.
    pub stddev: f64,
    pub count: usize,
}

impl StatSummary {
    /// Reduce `values`. `None` when empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();

        let mean = values.iter().sum::<f64>() / n as f64;
        let stddev = if n > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            min: sorted[0],
            q1: sorted[n / 4],
            median: sorted[n / 2],
            q3: sorted[n * 3 / 4],
            max: sorted[n - 1],
            mean,
            stddev,
            count: n,
        })
    }

    pub fn from_sample(sample: &DurationSample) -> Option<Self> {
        Self::from_values(sample.values())
    }

    /// Scoring scalar. The minimum is the value least disturbed by
    /// interruptions, which only ever lengthen a trial.
    pub fn best(&self) -> f64 {
        self.min
    }

    /// Whether the sample is large enough for quartiles to mean anything.
    pub fn show_details(&self) -> bool {
        self.count >= DETAIL_THRESHOLD
    }
}
