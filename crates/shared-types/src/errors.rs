//! # Error Types
//!
//! Defines error types shared between the renderer, the engine and the runtime.

use thiserror::Error;

/// A workload could not be built or rendered.
///
/// Produced by the rendering collaborator; local to one trial.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkloadError {
    /// Graph construction failed.
    #[error("Failed to build workload {workload}: {cause}")]
    Build { workload: String, cause: String },

    /// Rendering started but did not complete.
    #[error("Failed to render workload {workload}: {cause}")]
    Render { workload: String, cause: String },

    /// The renderer reported a duration that is not a finite non-negative number.
    #[error("Invalid duration reported for workload {workload}: {seconds}")]
    InvalidDuration { workload: String, seconds: f64 },
}

impl WorkloadError {
    /// Name of the workload that failed.
    pub fn workload(&self) -> &str {
        match self {
            WorkloadError::Build { workload, .. }
            | WorkloadError::Render { workload, .. }
            | WorkloadError::InvalidDuration { workload, .. } => workload,
        }
    }
}

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Two entries share a name.
    #[error("Duplicate workload name: {0}")]
    DuplicateName(String),

    /// Unit count must be positive.
    #[error("Workload {name} has zero units")]
    ZeroUnits { name: String },

    /// Duration factor must be a positive finite number.
    #[error("Workload {name} has invalid duration factor {factor}")]
    InvalidDurationFactor { name: String, factor: f64 },
}
