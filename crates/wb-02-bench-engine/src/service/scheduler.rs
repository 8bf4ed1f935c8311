//! Repeated-Trial Scheduler

use shared_types::{WorkloadError, WorkloadSpec};

use super::trial::TrialRunner;
use crate::domain::DurationSample;
use crate::ports::WorkloadRenderer;

/// Trials reserved up front; larger samples grow as trials complete.
const PREALLOCATED_TRIALS: u32 = 1024;

/// Runs a workload's trials one after another.
///
/// Trial `k + 1` is only started once trial `k` has returned. The first
/// failure ends the run and the durations collected so far are dropped.
pub struct RepeatedTrialScheduler<R: WorkloadRenderer> {
    runner: TrialRunner<R>,
}

impl<R: WorkloadRenderer> RepeatedTrialScheduler<R> {
    pub fn new(runner: TrialRunner<R>) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &TrialRunner<R> {
        &self.runner
    }

    /// Raw elapsed seconds of `trial_count` trials, in trial order.
    pub async fn run(
        &self,
        spec: &WorkloadSpec,
        trial_count: u32,
        seconds: f64,
    ) -> Result<DurationSample, WorkloadError> {
        let capacity = trial_count.min(PREALLOCATED_TRIALS) as usize;
        let mut sample = DurationSample::with_capacity(capacity);
        for _ in 0..trial_count {
            let elapsed = self.runner.run_trial(spec, seconds).await?;
            sample.push(elapsed);
        }
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::NoOpMetrics;
    use async_trait::async_trait;
    use shared_types::WorkloadKind;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Fails loudly if two renders overlap; optionally fails on one call.
    #[derive(Default)]
    struct ExclusiveRenderer {
        in_flight: AtomicBool,
        calls: AtomicU32,
        fail_on: Option<u32>,
    }

    #[async_trait]
    impl WorkloadRenderer for ExclusiveRenderer {
        async fn render_workload(&self, spec: &WorkloadSpec, _: f64) -> Result<f64, WorkloadError> {
            if self.in_flight.swap(true, Ordering::SeqCst) {
                panic!("concurrent render of {}", spec.name);
            }
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::task::yield_now().await;
            tokio::time::sleep(Duration::from_millis(1)).await;
            self.in_flight.store(false, Ordering::SeqCst);

            if self.fail_on == Some(call) {
                return Err(WorkloadError::Render {
                    workload: spec.name.to_string(),
                    cause: "device lost".to_string(),
                });
            }
            Ok(call as f64 / 100.0)
        }
    }

    const SPEC: WorkloadSpec = WorkloadSpec::new("Delay-0.1", 2, WorkloadKind::Delay { delay: Some(0.1) });

    fn scheduler(renderer: Arc<ExclusiveRenderer>) -> RepeatedTrialScheduler<ExclusiveRenderer> {
        RepeatedTrialScheduler::new(TrialRunner::new(renderer, Arc::new(NoOpMetrics), Duration::ZERO))
    }

    #[tokio::test]
    async fn test_runs_exactly_n_trials_sequentially() {
        let renderer = Arc::new(ExclusiveRenderer::default());
        let sample = scheduler(renderer.clone()).run(&SPEC, 5, 1.0).await.unwrap();
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 5);
        assert_eq!(sample.values(), &[0.01, 0.02, 0.03, 0.04, 0.05]);
    }

    #[tokio::test]
    async fn test_failure_discards_partial_durations() {
        let renderer = Arc::new(ExclusiveRenderer {
            fail_on: Some(3),
            ..Default::default()
        });
        let err = scheduler(renderer.clone()).run(&SPEC, 5, 1.0).await.unwrap_err();
        assert_eq!(err.workload(), "Delay-0.1");
        // No retry and nothing after the failure.
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_huge_trial_count_does_not_preallocate() {
        let renderer = Arc::new(ExclusiveRenderer {
            fail_on: Some(1),
            ..Default::default()
        });
        let err = scheduler(renderer.clone())
            .run(&SPEC, u32::MAX, 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkloadError::Render { .. }));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    }
}
