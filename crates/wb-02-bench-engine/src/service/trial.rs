//! Trial Runner

use std::sync::Arc;
use std::time::Duration;

use shared_types::{WorkloadError, WorkloadSpec};
use tracing::debug;

use crate::metrics::MetricsRecorder;
use crate::ports::WorkloadRenderer;

/// Runs one timed trial of a workload.
pub struct TrialRunner<R: WorkloadRenderer> {
    renderer: Arc<R>,
    metrics: Arc<dyn MetricsRecorder>,
    settle_delay: Duration,
}

impl<R: WorkloadRenderer> TrialRunner<R> {
    pub fn new(renderer: Arc<R>, metrics: Arc<dyn MetricsRecorder>, settle_delay: Duration) -> Self {
        Self {
            renderer,
            metrics,
            settle_delay,
        }
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Settle, then render `seconds` of `spec` and return the elapsed
    /// seconds reported by the renderer. Never retries.
    pub async fn run_trial(&self, spec: &WorkloadSpec, seconds: f64) -> Result<f64, WorkloadError> {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        let result = self
            .renderer
            .render_workload(spec, seconds)
            .await
            .and_then(|elapsed| {
                if elapsed.is_finite() && elapsed >= 0.0 {
                    Ok(elapsed)
                } else {
                    Err(WorkloadError::InvalidDuration {
                        workload: spec.name.to_string(),
                        seconds: elapsed,
                    })
                }
            });

        match &result {
            Ok(elapsed) => {
                debug!(workload = spec.name, "took {} ms", (elapsed * 1000.0).round());
                let elapsed = Duration::try_from_secs_f64(*elapsed).unwrap_or(Duration::MAX);
                self.metrics.record_trial(elapsed, true);
            }
            Err(e) => {
                debug!(workload = spec.name, error = %e, "trial failed");
                self.metrics.record_trial(Duration::ZERO, false);
            }
        }
        result
    }
}
