//! # WB-02 Bench Engine
//!
//! Turns repeated timed renders into comparable per-unit costs and one
//! composite score.
//!
//! ## Pipeline
//!
//! ```text
//! Trial Runner ──► Repeated-Trial Scheduler ──► Baseline Normalizer
//!                                                     │
//!         Composite Scorer ◄── Result Table ◄── Statistics Reducer
//! ```
//!
//! 1. The baseline workload runs first. Its fastest trial, in microseconds
//!    per rendered second, is the fixed overhead of a render.
//! 2. Every selected workload runs in catalog order. Each trial is converted
//!    to microseconds per rendered second, the baseline is subtracted and the
//!    rest divided by the workload's unit count.
//! 3. The minimum of each normalized sample goes into the result table.
//! 4. The scoring table weights those minimums into a single number.
//!
//! Trials never overlap. A workload that fails is recorded and the run moves
//! on; a baseline that fails aborts the run.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): settings, samples, statistics,
//!   normalization, result table, scoring tables, reports
//! - **Ports Layer** (`ports/`): `BenchmarkApi` (inbound), `WorkloadRenderer`
//!   and `ResultSink` (outbound)
//! - **Service Layer** (`service/`): `TrialRunner`, `RepeatedTrialScheduler`,
//!   `BenchmarkService`
//! - **Adapters Layer** (`adapters/`): result sinks
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wb_02_bench_engine::{BenchSettings, BenchmarkApi, BenchmarkService, TracingResultSink};
//!
//! let service = BenchmarkService::new(Arc::new(renderer))
//!     .with_sink(Arc::new(TracingResultSink));
//!
//! let selected = vec!["Gain-default".to_string(), "Delay-0.1".to_string()];
//! let report = service.run(&selected, &BenchSettings::default()).await?;
//! println!("{:?}", report.score);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{
    BenchmarkEvent, ChannelResultSink, CollectingResultSink, NoOpResultSink, TracingResultSink,
};
pub use domain::{
    micros_per_rendered_second, Baseline, BenchSettings, BenchSettingsBuilder, BenchmarkReport,
    BenchmarkScore, DurationSample, NegativeCostPolicy, ResultTable, ScoreGroup, ScoringTable,
    StatSummary, TestOutcome, WorkloadOutcome, WorkloadSummary, DEFAULT_RENDER_SECONDS,
    DEFAULT_SETTLE_DELAY, DEFAULT_TRIAL_COUNT, DETAIL_THRESHOLD, MAX_TRIAL_COUNT,
    MIXED_BENCHMARK,
};
pub use error::{BenchmarkError, ScoreError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{BenchmarkApi, ResultSink, WorkloadRenderer};
pub use service::{BenchmarkService, RepeatedTrialScheduler, TrialRunner};
