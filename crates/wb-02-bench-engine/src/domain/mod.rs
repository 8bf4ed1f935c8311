//! Domain layer: settings, samples, reduction, normalization, results and scoring.
//!
//! Everything here is synchronous and free of I/O.

pub mod normalize;
pub mod report;
pub mod results;
pub mod sample;
pub mod scoring;
pub mod settings;
pub mod stats;

pub use normalize::Baseline;
pub use report::{BenchmarkReport, BenchmarkScore, WorkloadOutcome, WorkloadSummary};
pub use results::{ResultTable, TestOutcome};
pub use sample::{micros_per_rendered_second, DurationSample};
pub use scoring::{ScoreGroup, ScoringTable, MIXED_BENCHMARK};
pub use settings::{
    BenchSettings, BenchSettingsBuilder, NegativeCostPolicy, DEFAULT_RENDER_SECONDS,
    DEFAULT_SETTLE_DELAY, DEFAULT_TRIAL_COUNT, MAX_TRIAL_COUNT,
};
pub use stats::{StatSummary, DETAIL_THRESHOLD};
