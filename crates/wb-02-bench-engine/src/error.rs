//! Error types for the benchmark engine

use serde::Serialize;
use shared_types::WorkloadError;
use thiserror::Error;

/// Errors that abort a benchmark run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BenchmarkError {
    /// Settings or selection rejected before any trial started.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The baseline workload could not be measured, so nothing can be normalized.
    #[error("Baseline measurement failed: {0}")]
    BaselineFailed(#[source] WorkloadError),

    #[error("Scoring failed: {0}")]
    Score(#[from] ScoreError),
}

/// Errors from the composite scorer
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreError {
    /// A group member has no usable result.
    #[error("No such test name: {name}")]
    MissingTestResult { name: String },

    /// The scoring table has no groups to average over.
    #[error("Scoring table {table} has no groups")]
    NoGroups { table: String },
}

impl BenchmarkError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        BenchmarkError::InvalidConfiguration(reason.into())
    }
}
