//! Inbound Ports (Driving Ports)

use async_trait::async_trait;

use crate::domain::{BenchSettings, BenchmarkReport, BenchmarkScore};
use crate::error::BenchmarkError;

/// Benchmark API (Driving Port)
#[async_trait]
pub trait BenchmarkApi: Send + Sync {
    /// Run the baseline then every selected workload in catalog order, and
    /// score the results.
    ///
    /// Individual workload failures are recorded in the report. Invalid
    /// settings or selection, and a failed baseline, abort the run.
    async fn run(
        &self,
        selected: &[String],
        settings: &BenchSettings,
    ) -> Result<BenchmarkReport, BenchmarkError>;

    /// Like [`run`](Self::run) with default settings for everything but
    /// trial count and render window, returning only the score. A scoring
    /// failure is an error here.
    async fn run_benchmark(
        &self,
        selected: &[String],
        trial_count: u32,
        render_seconds: u32,
    ) -> Result<BenchmarkScore, BenchmarkError>;
}
