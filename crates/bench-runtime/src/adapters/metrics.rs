//! Metrics adapter.

use std::time::Duration;

use wb_02_bench_engine::{Metrics, MetricsRecorder, MetricsSnapshot};

/// Records into the Prometheus registry and keeps local counters for the
/// end-of-run summary.
#[derive(Debug, Default)]
pub struct PrometheusMetrics {
    local: Metrics,
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.local.snapshot()
    }
}

impl MetricsRecorder for PrometheusMetrics {
    fn record_trial(&self, elapsed: Duration, success: bool) {
        self.local.record_trial(elapsed, success);
        bench_telemetry::observe_trial(elapsed.as_secs_f64(), success);
    }

    fn record_workload(&self, success: bool) {
        self.local.record_workload(success);
        bench_telemetry::observe_workload(success);
    }

    fn record_score(&self, value: f64) {
        self.local.record_score(value);
        bench_telemetry::set_score(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_locally_and_globally() {
        bench_telemetry::register_metrics().unwrap();
        let metrics = PrometheusMetrics::new();
        metrics.record_trial(Duration::from_millis(5), true);
        metrics.record_workload(false);
        metrics.record_score(12.5);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.trials_succeeded, 1);
        assert_eq!(snapshot.workloads_failed, 1);
        assert_eq!(snapshot.last_score, Some(12.5));
        assert_eq!(bench_telemetry::BENCHMARK_SCORE.get(), 12.5);
    }
}
