//! Run settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::BenchmarkError;

/// Trials per workload when not configured.
pub const DEFAULT_TRIAL_COUNT: u32 = 500;

/// Render window in seconds when not configured.
pub const DEFAULT_RENDER_SECONDS: u32 = 20;

/// Upper bound on trials per workload, baseline included.
pub const MAX_TRIAL_COUNT: u32 = 1_000_000;

/// Pause before each timed render.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(10);

/// What to do with negative per-unit costs before scoring.
///
/// Negative costs appear when a workload renders faster than the baseline
/// measured. The result table always keeps the raw value; the policy only
/// affects the scorer input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeCostPolicy {
    #[default]
    Retain,
    ClampToZero,
}

impl NegativeCostPolicy {
    pub fn apply(self, cost: f64) -> f64 {
        match self {
            NegativeCostPolicy::Retain => cost,
            NegativeCostPolicy::ClampToZero => cost.max(0.0),
        }
    }
}

/// Settings for one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchSettings {
    /// Trials per workload.
    pub trial_count: u32,
    /// Default render window; scaled per workload by its duration factor.
    pub render_seconds: u32,
    pub settle_delay: Duration,
    /// Baseline runs `trial_count * baseline_trial_multiplier` trials.
    pub baseline_trial_multiplier: u32,
    pub negative_cost_policy: NegativeCostPolicy,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_TRIAL_COUNT,
            render_seconds: DEFAULT_RENDER_SECONDS,
            settle_delay: DEFAULT_SETTLE_DELAY,
            baseline_trial_multiplier: 1,
            negative_cost_policy: NegativeCostPolicy::default(),
        }
    }
}

impl BenchSettings {
    pub fn builder() -> BenchSettingsBuilder {
        BenchSettingsBuilder::default()
    }

    /// Reject settings no run can use.
    pub fn validate(&self) -> Result<(), BenchmarkError> {
        if self.trial_count < 1 {
            return Err(BenchmarkError::invalid("The number of test runs is invalid"));
        }
        if self.render_seconds < 1 {
            return Err(BenchmarkError::invalid("The duration is invalid"));
        }
        if self.baseline_trial_multiplier < 1 {
            return Err(BenchmarkError::invalid(
                "Baseline trial multiplier must be at least 1",
            ));
        }
        let baseline_trials = self
            .trial_count
            .checked_mul(self.baseline_trial_multiplier)
            .filter(|&trials| trials <= MAX_TRIAL_COUNT);
        if self.trial_count > MAX_TRIAL_COUNT || baseline_trials.is_none() {
            return Err(BenchmarkError::invalid(format!(
                "The number of test runs is invalid (at most {MAX_TRIAL_COUNT} per workload)"
            )));
        }
        Ok(())
    }

    pub fn baseline_trial_count(&self) -> u32 {
        self.trial_count.saturating_mul(self.baseline_trial_multiplier)
    }
}

/// Fluent builder for [`BenchSettings`].
#[derive(Debug, Clone, Default)]
pub struct BenchSettingsBuilder {
    settings: BenchSettings,
}

impl BenchSettingsBuilder {
    pub fn trial_count(mut self, trial_count: u32) -> Self {
        self.settings.trial_count = trial_count;
        self
    }

    pub fn render_seconds(mut self, render_seconds: u32) -> Self {
        self.settings.render_seconds = render_seconds;
        self
    }

    pub fn settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settings.settle_delay = settle_delay;
        self
    }

    pub fn baseline_trial_multiplier(mut self, multiplier: u32) -> Self {
        self.settings.baseline_trial_multiplier = multiplier;
        self
    }

    pub fn negative_cost_policy(mut self, policy: NegativeCostPolicy) -> Self {
        self.settings.negative_cost_policy = policy;
        self
    }

    /// Build and validate.
    pub fn build(self) -> Result<BenchSettings, BenchmarkError> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}
