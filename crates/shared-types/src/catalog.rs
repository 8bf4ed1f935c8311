//! # Workload Catalog
//!
//! The fixed list of workloads the benchmark knows about, plus the baseline
//! reference workload used to measure per-render overhead.
//!
//! Catalog order is run order. Unit counts are chosen so that each workload
//! renders for a meaningful amount of time on current hardware.

use crate::entities::{
    AutomationRate::{ARate, KRate},
    Oversample, PanningModel,
    RampType::{Curve, Exp, Linear, Target},
    WorkloadKind as K, WorkloadSpec,
};
use crate::errors::CatalogError;
use std::collections::HashSet;

/// Name of the baseline reference workload.
pub const BASELINE_NAME: &str = "Baseline";

/// Pass-through reference workload. Rendered for four times the default window.
pub const BASELINE: WorkloadSpec =
    WorkloadSpec::new(BASELINE_NAME, 1, K::Passthrough).with_duration_factor(4.0);

/// The standard workload list, in run order.
pub static STANDARD_WORKLOADS: &[WorkloadSpec] = &[
    WorkloadSpec::new("Biquad-default", 7, K::Biquad { frequency: None }),
    WorkloadSpec::new("Biquad-440", 7, K::Biquad { frequency: Some(440.0) }),
    WorkloadSpec::new("AudioBufferSource-rate1", 20, K::AudioBufferSource { playback_rate: 1.0 }),
    WorkloadSpec::new("AudioBufferSource-rate0.9", 8, K::AudioBufferSource { playback_rate: 0.9 }),
    WorkloadSpec::new("Oscillator", 3, K::Oscillator),
    WorkloadSpec::new("Oscillator.frequency-linear-a-rate", 3, K::OscillatorAutomation { rate: ARate }),
    WorkloadSpec::new("Oscillator.frequency-linear-k-rate", 3, K::OscillatorAutomation { rate: KRate }),
    WorkloadSpec::new("Gain-default", 30, K::Gain { gain: None, rate: None }),
    WorkloadSpec::new("Gain-1.0", 30, K::Gain { gain: Some(1.0), rate: None }),
    WorkloadSpec::new("Gain-0.9", 30, K::Gain { gain: Some(0.9), rate: None }),
    WorkloadSpec::new("Gain-0.9-k-rate", 30, K::Gain { gain: Some(0.9), rate: Some(KRate) }),
    WorkloadSpec::new("GainCancel-1.0", 30, K::GainCancel { gain: Some(1.0), rate: None }),
    WorkloadSpec::new("GainCancel-0.9", 30, K::GainCancel { gain: Some(0.9), rate: None }),
    WorkloadSpec::new("GainCancel-0.9-k-rate", 30, K::GainCancel { gain: Some(0.9), rate: Some(KRate) }),
    WorkloadSpec::new("GainAutomation-exp-a-rate", 12, K::GainAutomation { ramp: Exp, rate: ARate }),
    WorkloadSpec::new("GainAutomation-linear-a-rate", 12, K::GainAutomation { ramp: Linear, rate: ARate }),
    WorkloadSpec::new("GainAutomation-target-a-rate", 12, K::GainAutomation { ramp: Target, rate: ARate }),
    WorkloadSpec::new("GainAutomation-curve-a-rate", 12, K::GainAutomation { ramp: Curve, rate: ARate }),
    WorkloadSpec::new("GainAutomation-exp-k-rate", 12, K::GainAutomation { ramp: Exp, rate: KRate }),
    WorkloadSpec::new("GainAutomation-linear-k-rate", 12, K::GainAutomation { ramp: Linear, rate: KRate }),
    WorkloadSpec::new("GainAutomation-target-k-rate", 12, K::GainAutomation { ramp: Target, rate: KRate }),
    WorkloadSpec::new("GainAutomation-curve-k-rate", 12, K::GainAutomation { ramp: Curve, rate: KRate }),
    WorkloadSpec::new("GainAutomationConn-a-rate", 12, K::GainAutomationConn { rate: ARate }),
    WorkloadSpec::new("GainAutomationConn-k-rate", 12, K::GainAutomationConn { rate: KRate }),
    WorkloadSpec::new("BiquadAutomation-exp-a-rate", 3, K::BiquadAutomation { ramp: Exp, rate: ARate }),
    WorkloadSpec::new("BiquadAutomation-linear-a-rate", 3, K::BiquadAutomation { ramp: Linear, rate: ARate }),
    WorkloadSpec::new("BiquadAutomation-target-a-rate", 3, K::BiquadAutomation { ramp: Target, rate: ARate }),
    WorkloadSpec::new("BiquadAutomation-curve-a-rate", 3, K::BiquadAutomation { ramp: Curve, rate: ARate }),
    WorkloadSpec::new("BiquadAutomation-exp-k-rate", 3, K::BiquadAutomation { ramp: Exp, rate: KRate }),
    WorkloadSpec::new("BiquadAutomation-linear-k-rate", 3, K::BiquadAutomation { ramp: Linear, rate: KRate }),
    WorkloadSpec::new("BiquadAutomation-target-k-rate", 3, K::BiquadAutomation { ramp: Target, rate: KRate }),
    WorkloadSpec::new("BiquadAutomation-curve-k-rate", 3, K::BiquadAutomation { ramp: Curve, rate: KRate }),
    WorkloadSpec::new("Delay-default", 2, K::Delay { delay: None }),
    WorkloadSpec::new("Delay-0.1", 2, K::Delay { delay: Some(0.1) }),
    WorkloadSpec::new("DelayAutomation-a-rate", 2, K::DelayAutomation { rate: ARate }),
    WorkloadSpec::new("DelayAutomation-k-rate", 2, K::DelayAutomation { rate: KRate }),
    WorkloadSpec::new("ChannelSplitter", 30, K::ChannelSplitter),
    WorkloadSpec::new("ChannelMerger", 30, K::ChannelMerger),
    WorkloadSpec::new("Analyser", 30, K::Analyser),
    WorkloadSpec::new("WaveShaper-1x", 6, K::WaveShaper { oversample: Oversample::None }),
    WorkloadSpec::new("WaveShaper-2x", 2, K::WaveShaper { oversample: Oversample::X2 }),
    WorkloadSpec::new("WaveShaper-4x", 1, K::WaveShaper { oversample: Oversample::X4 }),
    WorkloadSpec::new("Compressor-knee-0", 1, K::Compressor { knee: 0.0 }),
    WorkloadSpec::new("Compressor-knee-40", 1, K::Compressor { knee: 40.0 }),
    WorkloadSpec::new("Convolver-128f-3ms", 3, K::Convolver { length: 128 }),
    WorkloadSpec::new("Convolver-1024f-23ms", 1, K::Convolver { length: 1024 }),
    WorkloadSpec::new("Convolver-2048f-46ms", 1, K::Convolver { length: 2048 }),
    WorkloadSpec::new("Convolver-32768f-743ms", 1, K::Convolver { length: 32768 })
        .with_duration_factor(0.6),
    WorkloadSpec::new("Panner-equalpower", 5, K::Panner { model: PanningModel::EqualPower }),
    WorkloadSpec::new("Panner-HRTF", 1, K::Panner { model: PanningModel::Hrtf }),
    WorkloadSpec::new("StereoPanner-default", 20, K::StereoPanner { pan: None }),
    WorkloadSpec::new("StereoPanner-0", 20, K::StereoPanner { pan: Some(0.0) }),
    WorkloadSpec::new("StereoPanner-0.2", 20, K::StereoPanner { pan: Some(0.2) }),
    WorkloadSpec::new("StereoPanner-1", 20, K::StereoPanner { pan: Some(1.0) }),
];

/// Validated, ordered set of workloads plus the baseline reference workload.
#[derive(Debug, Clone)]
pub struct WorkloadCatalog {
    baseline: WorkloadSpec,
    workloads: Vec<WorkloadSpec>,
}

impl WorkloadCatalog {
    /// The standard catalog.
    pub fn standard() -> Self {
        Self {
            baseline: BASELINE,
            workloads: STANDARD_WORKLOADS.to_vec(),
        }
    }

    /// Create a catalog from custom entries.
    ///
    /// Rejects duplicate names (including a workload named like the baseline),
    /// zero unit counts and non-positive duration factors.
    pub fn new(baseline: WorkloadSpec, workloads: Vec<WorkloadSpec>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for spec in std::iter::once(&baseline).chain(workloads.iter()) {
            if !seen.insert(spec.name) {
                return Err(CatalogError::DuplicateName(spec.name.to_string()));
            }
            if spec.unit_count == 0 {
                return Err(CatalogError::ZeroUnits {
                    name: spec.name.to_string(),
                });
            }
            if !(spec.duration_factor.is_finite() && spec.duration_factor > 0.0) {
                return Err(CatalogError::InvalidDurationFactor {
                    name: spec.name.to_string(),
                    factor: spec.duration_factor,
                });
            }
        }
        Ok(Self { baseline, workloads })
    }

    /// The baseline reference workload.
    pub fn baseline(&self) -> &WorkloadSpec {
        &self.baseline
    }

    /// Workloads in catalog order (baseline excluded).
    pub fn iter(&self) -> impl Iterator<Item = &WorkloadSpec> {
        self.workloads.iter()
    }

    /// Look up a workload (or the baseline) by name.
    pub fn get(&self, name: &str) -> Option<&WorkloadSpec> {
        if self.baseline.name == name {
            return Some(&self.baseline);
        }
        self.workloads.iter().find(|spec| spec.name == name)
    }

    /// Whether the name refers to a workload or the baseline.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Workload names in catalog order.
    pub fn names(&self) -> Vec<&'static str> {
        self.workloads.iter().map(|spec| spec.name).collect()
    }

    /// Names of workloads whose name contains `pattern`; all names when `None`.
    pub fn select(&self, pattern: Option<&str>) -> Vec<&'static str> {
        self.workloads
            .iter()
            .filter(|spec| pattern.map_or(true, |p| spec.name.contains(p)))
            .map(|spec| spec.name)
            .collect()
    }

    /// Number of workloads (baseline excluded).
    pub fn len(&self) -> usize {
        self.workloads.len()
    }

    /// Whether the catalog has no workloads besides the baseline.
    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }
}

impl Default for WorkloadCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = WorkloadCatalog::standard();
        assert!(WorkloadCatalog::new(*catalog.baseline(), catalog.iter().copied().collect()).is_ok());
        assert_eq!(catalog.len(), 54);
    }

    #[test]
    fn test_baseline_shape() {
        let catalog = WorkloadCatalog::standard();
        let baseline = catalog.baseline();
        assert_eq!(baseline.name, BASELINE_NAME);
        assert_eq!(baseline.unit_count, 1);
        assert_eq!(baseline.duration_factor, 4.0);
        assert_eq!(baseline.kind, K::Passthrough);
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let names = WorkloadCatalog::standard().names();
        assert_eq!(names[0], "Biquad-default");
        assert_eq!(names[names.len() - 1], "StereoPanner-1");
    }

    #[test]
    fn test_select_by_pattern() {
        let catalog = WorkloadCatalog::standard();
        let selected = catalog.select(Some("Oscillator"));
        assert_eq!(
            selected,
            vec![
                "Oscillator",
                "Oscillator.frequency-linear-a-rate",
                "Oscillator.frequency-linear-k-rate"
            ]
        );
        assert_eq!(catalog.select(None).len(), catalog.len());
        assert!(catalog.select(Some("NoSuchNode")).is_empty());
    }

    #[test]
    fn test_lookup_includes_baseline() {
        let catalog = WorkloadCatalog::standard();
        assert!(catalog.contains(BASELINE_NAME));
        assert_eq!(catalog.get("Delay-0.1").map(|s| s.unit_count), Some(2));
        assert!(catalog.get("Delay-0.2").is_none());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let a = WorkloadSpec::new("A", 1, K::Analyser);
        let result = WorkloadCatalog::new(BASELINE, vec![a, a]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateName("A".to_string()));
    }

    #[test]
    fn test_rejects_zero_units() {
        let a = WorkloadSpec::new("A", 0, K::Analyser);
        assert!(matches!(
            WorkloadCatalog::new(BASELINE, vec![a]),
            Err(CatalogError::ZeroUnits { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_duration_factor() {
        let a = WorkloadSpec::new("A", 1, K::Analyser).with_duration_factor(0.0);
        assert!(matches!(
            WorkloadCatalog::new(BASELINE, vec![a]),
            Err(CatalogError::InvalidDurationFactor { .. })
        ));
    }
}
