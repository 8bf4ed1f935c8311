//! Outbound Ports (Driven Ports)

use async_trait::async_trait;
use shared_types::{WorkloadError, WorkloadSpec};

use crate::domain::{BenchmarkScore, WorkloadOutcome};
use crate::error::ScoreError;

/// Builds and renders one workload, timing the render.
///
/// Implementations resolve exactly once per call and must not overlap
/// renders; the engine never issues a second call before the first returns.
#[async_trait]
pub trait WorkloadRenderer: Send + Sync {
    /// Render `seconds` of `spec` and return the elapsed wall-clock seconds.
    async fn render_workload(&self, spec: &WorkloadSpec, seconds: f64) -> Result<f64, WorkloadError>;
}

/// Receives progress as a run advances.
pub trait ResultSink: Send + Sync {
    /// A workload finished, baseline included.
    fn on_result(&self, name: &str, outcome: &WorkloadOutcome);

    /// The run was scored.
    fn on_score(&self, score: &BenchmarkScore);

    /// Scoring failed.
    fn on_score_failed(&self, _error: &ScoreError) {}
}
