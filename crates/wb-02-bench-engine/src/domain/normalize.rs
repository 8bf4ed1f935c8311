//! Baseline normalizer.

use serde::Serialize;

use super::sample::DurationSample;

/// Fixed per-render overhead, measured on the pass-through workload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Baseline(f64);

impl Baseline {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Minimum of the baseline workload's sample.
    pub fn from_sample(sample: &DurationSample) -> Option<Self> {
        sample.min().map(Self)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Per-unit, overhead-free sample: `(d - baseline) / unit_count` for
    /// every value. Negative results are kept.
    pub fn normalize(&self, sample: &DurationSample, unit_count: u32) -> DurationSample {
        let units = f64::from(unit_count.max(1));
        sample.map(|d| (d - self.0) / units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stats::StatSummary;

    #[test]
    fn test_normalizes_and_picks_best() {
        let baseline = Baseline::new(100_000.0);
        let raw: DurationSample = vec![150_000.0, 160_000.0, 140_000.0].into();
        let normalized = baseline.normalize(&raw, 10);
        assert_eq!(normalized.values(), &[5000.0, 6000.0, 4000.0]);
        assert_eq!(StatSummary::from_sample(&normalized).unwrap().best(), 4000.0);
    }

    #[test]
    fn test_negative_costs_are_kept() {
        let baseline = Baseline::new(100.0);
        let raw: DurationSample = vec![90.0, 110.0].into();
        assert_eq!(baseline.normalize(&raw, 2).values(), &[-5.0, 5.0]);
    }

    #[test]
    fn test_baseline_is_sample_min() {
        let sample: DurationSample = vec![120.0, 100.0, 130.0].into();
        assert_eq!(Baseline::from_sample(&sample).unwrap().value(), 100.0);
        assert!(Baseline::from_sample(&DurationSample::new()).is_none());
    }
}
