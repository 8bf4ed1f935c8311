//! Run reports.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::results::ResultTable;
use super::settings::BenchSettings;
use super::stats::StatSummary;
use crate::error::ScoreError;

/// Composite score of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkScore {
    /// Scoring table name.
    pub name: String,
    pub value: f64,
}

/// Per-workload progress event payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkloadOutcome {
    Completed { summary: StatSummary },
    Failed { cause: String },
}

/// Summary of one measured workload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadSummary {
    pub name: String,
    pub unit_count: u32,
    pub summary: StatSummary,
}

/// Everything one orchestration produced.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub settings: BenchSettings,
    /// Baseline overhead in microseconds per rendered second.
    pub baseline: f64,
    pub results: ResultTable,
    /// Summaries in run order, baseline first. Failed workloads have none.
    pub summaries: Vec<WorkloadSummary>,
    /// Scoring failure leaves the rest of the report valid.
    pub score: Result<BenchmarkScore, ScoreError>,
}

impl BenchmarkReport {
    pub fn summary(&self, name: &str) -> Option<&StatSummary> {
        self.summaries
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.summary)
    }

    /// Workloads that ran, baseline included.
    pub fn workload_count(&self) -> usize {
        self.results.len()
    }

    pub fn failed_count(&self) -> usize {
        self.results.failures()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
