//! Metrics hooks for benchmark runs
//!
//! The engine reports through `MetricsRecorder`; the in-process `Metrics`
//! collector keeps atomic counters, and exporters (Prometheus in the runtime)
//! implement the same trait.
//!
//! ## Usage
//!
//! ```ignore
//! use wb_02_bench_engine::metrics::{Metrics, MetricsRecorder};
//!
//! let metrics = Metrics::new();
//! metrics.record_trial(std::time::Duration::from_millis(40), true);
//! assert_eq!(metrics.snapshot().trials_succeeded, 1);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Atomic counters for benchmark activity
#[derive(Debug, Default)]
pub struct Metrics {
    /// Trials that returned a duration
    pub trials_succeeded: AtomicU64,
    /// Trials that failed
    pub trials_failed: AtomicU64,
    /// Workloads measured to completion
    pub workloads_completed: AtomicU64,
    /// Workloads recorded as failed
    pub workloads_failed: AtomicU64,
    /// Cumulative successful trial time in nanoseconds
    pub trial_time_ns: AtomicU64,
    /// Bits of the last composite score (`f64::to_bits`)
    last_score_bits: AtomicU64,
    /// Whether a score has been recorded
    scored: AtomicBool,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_trial(&self, elapsed: Duration, success: bool) {
        if success {
            self.trials_succeeded.fetch_add(1, Ordering::Relaxed);
            self.trial_time_ns
                .fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
        } else {
            self.trials_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_workload(&self, success: bool) {
        if success {
            self.workloads_completed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.workloads_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_score(&self, value: f64) {
        self.last_score_bits.store(value.to_bits(), Ordering::Relaxed);
        self.scored.store(true, Ordering::Relaxed);
    }

    /// Average successful trial time in nanoseconds
    pub fn avg_trial_time_ns(&self) -> u64 {
        let total = self.trial_time_ns.load(Ordering::Relaxed);
        let count = self.trials_succeeded.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let last_score = self
            .scored
            .load(Ordering::Relaxed)
            .then(|| f64::from_bits(self.last_score_bits.load(Ordering::Relaxed)));
        MetricsSnapshot {
            trials_succeeded: self.trials_succeeded.load(Ordering::Relaxed),
            trials_failed: self.trials_failed.load(Ordering::Relaxed),
            workloads_completed: self.workloads_completed.load(Ordering::Relaxed),
            workloads_failed: self.workloads_failed.load(Ordering::Relaxed),
            avg_trial_ns: self.avg_trial_time_ns(),
            last_score,
        }
    }

    pub fn reset(&self) {
        self.trials_succeeded.store(0, Ordering::Relaxed);
        self.trials_failed.store(0, Ordering::Relaxed);
        self.workloads_completed.store(0, Ordering::Relaxed);
        self.workloads_failed.store(0, Ordering::Relaxed);
        self.trial_time_ns.store(0, Ordering::Relaxed);
        self.last_score_bits.store(0, Ordering::Relaxed);
        self.scored.store(false, Ordering::Relaxed);
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub trials_succeeded: u64,
    pub trials_failed: u64,
    pub workloads_completed: u64,
    pub workloads_failed: u64,
    pub avg_trial_ns: u64,
    pub last_score: Option<f64>,
}

/// Sink for benchmark metrics
pub trait MetricsRecorder: Send + Sync {
    /// One trial finished; `elapsed` is the rendered duration on success.
    fn record_trial(&self, elapsed: Duration, success: bool);
    /// One workload finished or was recorded as failed.
    fn record_workload(&self, success: bool);
    /// Composite score of a finished run.
    fn record_score(&self, value: f64);
}

/// Recorder that drops everything
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_trial(&self, _: Duration, _: bool) {}
    fn record_workload(&self, _: bool) {}
    fn record_score(&self, _: f64) {}
}

impl MetricsRecorder for Metrics {
    fn record_trial(&self, elapsed: Duration, success: bool) {
        Metrics::record_trial(self, elapsed, success);
    }

    fn record_workload(&self, success: bool) {
        Metrics::record_workload(self, success);
    }

    fn record_score(&self, value: f64) {
        Metrics::record_score(self, value);
    }
}
