//! # Bench Telemetry
//!
//! Logging and metrics for the WebAudio bench.
//!
//! - **Logs**: `tracing-subscriber` with an `EnvFilter`, plain or JSON
//! - **Metrics**: Prometheus counters, a trial duration histogram and a
//!   score gauge in a crate-local registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bench_telemetry::{init_telemetry, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig::from_env())?;
//! // ... run benchmarks ...
//! println!("{}", bench_telemetry::gather_text()?);
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WB_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `WB_JSON_LOGS` | `false` | JSON output |
//! | `WB_LOG_TARGET` | `false` | Include module paths |

mod config;
pub mod metrics;
mod subscriber;

pub use config::TelemetryConfig;
pub use metrics::{
    gather_text, observe_trial, observe_workload, register_metrics, set_score, BENCHMARK_SCORE,
    TRIALS_TOTAL, TRIAL_DURATION, WORKLOADS_TOTAL,
};
pub use subscriber::{env_filter, init_subscriber};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the global subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_subscriber(config)
}
