//! # Workload Entities
//!
//! Defines the workload descriptors measured by the benchmark.
//!
//! ## Clusters
//!
//! - **Identity**: `WorkloadSpec` (name, unit count, duration factor)
//! - **Shape**: `WorkloadKind` and its parameter enums (`AutomationRate`,
//!   `RampType`, `Oversample`, `PanningModel`)

use serde::Serialize;
use std::fmt;

// =============================================================================
// PARAMETER ENUMS
// =============================================================================

/// How often an automated parameter is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutomationRate {
    /// Evaluated for every sample frame.
    ARate,
    /// Evaluated once per render quantum.
    KRate,
}

impl fmt::Display for AutomationRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomationRate::ARate => write!(f, "a-rate"),
            AutomationRate::KRate => write!(f, "k-rate"),
        }
    }
}

/// Shape of the scheduled automation applied to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RampType {
    /// Exponential ramps between scheduled values.
    Exp,
    /// Linear ramps between scheduled values.
    Linear,
    /// Exponential approach towards a target value.
    Target,
    /// Piecewise-linear value curve.
    Curve,
}

impl fmt::Display for RampType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RampType::Exp => write!(f, "exp"),
            RampType::Linear => write!(f, "linear"),
            RampType::Target => write!(f, "target"),
            RampType::Curve => write!(f, "curve"),
        }
    }
}

/// Oversampling applied by a wave shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Oversample {
    None,
    X2,
    X4,
}

impl Oversample {
    /// Upsampling factor.
    pub const fn factor(self) -> usize {
        match self {
            Oversample::None => 1,
            Oversample::X2 => 2,
            Oversample::X4 => 4,
        }
    }
}

/// Spatialisation algorithm of a 3D panner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PanningModel {
    EqualPower,
    Hrtf,
}

// =============================================================================
// WORKLOAD SHAPE
// =============================================================================

/// The processing-graph shape of a workload.
///
/// Each variant names one processing node type and the parameters its
/// instances are configured with. Chained variants insert `unit_count`
/// nodes in series after the shared source; source variants mix
/// `unit_count` generators straight into the destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum WorkloadKind {
    /// Source straight to destination. Used for the baseline.
    Passthrough,
    /// Lowpass biquads; `None` keeps the default cutoff.
    Biquad { frequency: Option<f32> },
    /// Lowpass biquads with scheduled Q automation.
    BiquadAutomation { ramp: RampType, rate: AutomationRate },
    /// Looping buffer sources mixed into the destination.
    AudioBufferSource { playback_rate: f32 },
    /// Sine oscillators mixed into the destination.
    Oscillator,
    /// Sine oscillators with a linear frequency sweep.
    OscillatorAutomation { rate: AutomationRate },
    /// Gain nodes; `None` keeps the default gain / automation rate.
    Gain {
        gain: Option<f32>,
        rate: Option<AutomationRate>,
    },
    /// Gain nodes whose schedule is cancelled right after the value is set.
    GainCancel {
        gain: Option<f32>,
        rate: Option<AutomationRate>,
    },
    /// Gain nodes with scheduled gain automation.
    GainAutomation { ramp: RampType, rate: AutomationRate },
    /// Gain nodes whose gain parameter is driven by the source signal.
    GainAutomationConn { rate: AutomationRate },
    /// Delay lines; `None` keeps the default delay time.
    Delay { delay: Option<f32> },
    /// Delay lines with a scheduled delay-time step.
    DelayAutomation { rate: AutomationRate },
    /// Two-way channel splitters, first output chained.
    ChannelSplitter,
    /// Two-way channel mergers, first input chained.
    ChannelMerger,
    /// Analysers (pass-through with capture).
    Analyser,
    /// Wave shapers with a fixed curve.
    WaveShaper { oversample: Oversample },
    /// Dynamics compressors with the given knee in dB.
    Compressor { knee: f32 },
    /// Convolvers with an impulse response of `length` frames.
    Convolver { length: usize },
    /// 3D panners at a fixed position.
    Panner { model: PanningModel },
    /// Stereo panners; `None` keeps the default pan.
    StereoPanner { pan: Option<f32> },
}

impl WorkloadKind {
    /// Whether the workload's nodes are generators mixed into the destination
    /// rather than processors chained after the source.
    pub const fn is_source(&self) -> bool {
        matches!(
            self,
            WorkloadKind::Oscillator
                | WorkloadKind::OscillatorAutomation { .. }
                | WorkloadKind::AudioBufferSource { .. }
        )
    }
}

// =============================================================================
// WORKLOAD SPEC
// =============================================================================

/// One catalog entry.
///
/// Immutable once constructed. `unit_count` is the number of processing nodes
/// the workload instantiates and is the divisor used for per-unit costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkloadSpec {
    /// Unique workload name, also the result-table key.
    pub name: &'static str,
    /// Number of processing nodes instantiated (always > 0).
    pub unit_count: u32,
    /// Multiplier applied to the requested render duration (always > 0).
    pub duration_factor: f64,
    /// Graph shape.
    pub kind: WorkloadKind,
}

impl WorkloadSpec {
    /// Create a workload with the default duration factor of 1.0.
    pub const fn new(name: &'static str, unit_count: u32, kind: WorkloadKind) -> Self {
        Self {
            name,
            unit_count,
            duration_factor: 1.0,
            kind,
        }
    }

    /// Builder-style method to set the duration factor.
    pub const fn with_duration_factor(mut self, duration_factor: f64) -> Self {
        self.duration_factor = duration_factor;
        self
    }

    /// Render duration for this workload given the requested default.
    pub fn render_seconds(&self, default_seconds: f64) -> f64 {
        default_seconds * self.duration_factor
    }
}

impl fmt::Display for WorkloadSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} units)", self.name, self.unit_count)
    }
}
