//! # Runtime Configuration
//!
//! Command-line flags, each backed by an environment variable. Flags win
//! over the environment, which wins over the defaults.

use std::env;

use bench_telemetry::TelemetryConfig;
use clap::Parser;
use shared_types::WorkloadCatalog;
use wb_02_bench_engine::{
    BenchSettings, BenchmarkError, NegativeCostPolicy, DEFAULT_RENDER_SECONDS, DEFAULT_TRIAL_COUNT,
};

/// Verbosity at which every trial is logged.
pub const TRIAL_LOG_VERBOSITY: u32 = 99;

/// Per-node cost benchmark for audio processing graphs
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "wab-bench")]
#[command(about = "Measure per-node rendering cost and compute a composite score")]
pub struct RuntimeConfig {
    /// Trials per workload
    #[arg(long, env = "WB_RUNS", default_value_t = DEFAULT_TRIAL_COUNT)]
    pub runs: u32,

    /// Seconds of audio rendered per trial
    #[arg(long, env = "WB_SECONDS", default_value_t = DEFAULT_RENDER_SECONDS)]
    pub sec: u32,

    /// Only run workloads whose name contains this text
    #[arg(long, env = "WB_PATTERN")]
    pub pattern: Option<String>,

    /// 0 logs warnings only; 99 and above logs every trial
    #[arg(long, env = "WB_VERBOSITY", default_value_t = TRIAL_LOG_VERBOSITY)]
    pub verbosity: u32,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Print the workload catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Score negative per-unit costs as zero
    #[arg(long)]
    pub clamp_negative: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_TRIAL_COUNT,
            sec: DEFAULT_RENDER_SECONDS,
            pattern: None,
            verbosity: TRIAL_LOG_VERBOSITY,
            json: false,
            list: false,
            clamp_negative: false,
        }
    }
}

impl RuntimeConfig {
    /// Engine settings for these flags.
    pub fn bench_settings(&self) -> Result<BenchSettings, BenchmarkError> {
        let policy = if self.clamp_negative {
            NegativeCostPolicy::ClampToZero
        } else {
            NegativeCostPolicy::Retain
        };
        BenchSettings::builder()
            .trial_count(self.runs)
            .render_seconds(self.sec)
            .negative_cost_policy(policy)
            .build()
    }

    /// Workloads matching the pattern, in catalog order.
    pub fn selection(&self, catalog: &WorkloadCatalog) -> Vec<String> {
        catalog
            .select(self.pattern.as_deref())
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Log filter implied by `verbosity`.
    pub fn log_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            v if v >= TRIAL_LOG_VERBOSITY => "info,wb_02_bench_engine=debug",
            _ => "info",
        }
    }

    /// Telemetry settings. An explicit `WB_LOG_LEVEL` or `RUST_LOG` beats
    /// the verbosity flag.
    pub fn telemetry(&self) -> TelemetryConfig {
        let config = TelemetryConfig::from_env();
        if env::var("WB_LOG_LEVEL").is_ok() || env::var("RUST_LOG").is_ok() {
            config
        } else {
            config.with_log_level(self.log_directive())
        }
    }
}
