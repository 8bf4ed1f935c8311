//! Prometheus metrics for benchmark runs.
//!
//! Names follow `wb_<thing>_<unit>`:
//!
//! - `wb_trials_total{outcome}`: trials by outcome (ok/error)
//! - `wb_trial_duration_seconds`: wall-clock render time per trial
//! - `wb_workloads_total{outcome}`: workloads by outcome (ok/error)
//! - `wb_benchmark_score`: composite score of the last scored run

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Gauge, Histogram, HistogramOpts, IntCounterVec, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

/// Label value for a successful trial or workload.
pub const OUTCOME_OK: &str = "ok";
/// Label value for a failed trial or workload.
pub const OUTCOME_ERROR: &str = "error";

lazy_static! {
    /// Registry holding every bench metric
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref TRIALS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("wb_trials_total", "Render trials by outcome"),
        &["outcome"]
    ).expect("metric creation failed");

    pub static ref TRIAL_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "wb_trial_duration_seconds",
            "Wall-clock time spent rendering one trial"
        ).buckets(exponential_buckets(0.001, 2.0, 16).expect("valid buckets"))
    ).expect("metric creation failed");

    pub static ref WORKLOADS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("wb_workloads_total", "Workloads by outcome"),
        &["outcome"]
    ).expect("metric creation failed");

    pub static ref BENCHMARK_SCORE: Gauge = Gauge::new(
        "wb_benchmark_score",
        "Composite score of the last scored run"
    ).expect("metric creation failed");
}

/// Register all metrics with [`REGISTRY`]. Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRIALS_TOTAL.clone()),
        Box::new(TRIAL_DURATION.clone()),
        Box::new(WORKLOADS_TOTAL.clone()),
        Box::new(BENCHMARK_SCORE.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

pub fn outcome_label(ok: bool) -> &'static str {
    if ok {
        OUTCOME_OK
    } else {
        OUTCOME_ERROR
    }
}

/// Record one trial.
pub fn observe_trial(seconds: f64, ok: bool) {
    TRIALS_TOTAL.with_label_values(&[outcome_label(ok)]).inc();
    if ok {
        TRIAL_DURATION.observe(seconds);
    }
}

pub fn observe_workload(ok: bool) {
    WORKLOADS_TOTAL.with_label_values(&[outcome_label(ok)]).inc();
}

pub fn set_score(score: f64) {
    BENCHMARK_SCORE.set(score);
}

/// Registered metrics in the Prometheus text exposition format.
pub fn gather_text() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        register_metrics().unwrap();
        register_metrics().unwrap();
    }

    #[test]
    fn test_trial_counters() {
        let before = TRIALS_TOTAL.with_label_values(&[OUTCOME_ERROR]).get();
        observe_trial(0.5, false);
        assert_eq!(
            TRIALS_TOTAL.with_label_values(&[OUTCOME_ERROR]).get(),
            before + 1
        );
    }

    #[test]
    fn test_gather_text_contains_metrics() {
        register_metrics().unwrap();
        observe_trial(0.01, true);
        observe_workload(true);
        set_score(13.0);

        let text = gather_text().unwrap();
        assert!(text.contains("wb_trials_total"));
        assert!(text.contains("wb_trial_duration_seconds_bucket"));
        assert!(text.contains("wb_workloads_total{outcome=\"ok\"}"));
        assert!(text.contains("wb_benchmark_score"));
    }
}
