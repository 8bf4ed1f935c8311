//! Duration samples.

use serde::Serialize;

const MICROS_PER_SECOND: f64 = 1e6;

/// Microseconds of compute per second of rendered audio.
pub fn micros_per_rendered_second(elapsed_seconds: f64, render_seconds: f64) -> f64 {
    elapsed_seconds / render_seconds * MICROS_PER_SECOND
}

/// Durations of one workload across its trials, in trial order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DurationSample {
    values: Vec<f64>,
}

impl DurationSample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().min_by(f64::total_cmp)
    }

    /// Apply `f` to every value, keeping order.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl From<Vec<f64>> for DurationSample {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl FromIterator<f64> for DurationSample {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
