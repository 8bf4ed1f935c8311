//! Error types for the offline renderer

use shared_types::WorkloadError;
use thiserror::Error;

/// Errors raised while building or rendering a workload graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Invalid parameter for {workload}: {reason}")]
    InvalidParameter { workload: String, reason: String },

    #[error("Invalid render duration for {workload}: {seconds}s")]
    InvalidDuration { workload: String, seconds: f64 },

    #[error("Invalid sample rate for {workload}: {sample_rate}")]
    InvalidSampleRate { workload: String, sample_rate: f32 },
}

impl From<RenderError> for WorkloadError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::InvalidParameter { workload, reason } => WorkloadError::Build {
                workload,
                cause: reason,
            },
            RenderError::InvalidDuration { workload, seconds } => WorkloadError::Build {
                workload,
                cause: format!("cannot render {seconds}s of audio"),
            },
            RenderError::InvalidSampleRate {
                workload,
                sample_rate,
            } => WorkloadError::Build {
                workload,
                cause: format!("invalid sample rate {sample_rate}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_render_error_names_its_workload() {
        let errors = [
            RenderError::InvalidParameter {
                workload: "Gain-default".to_string(),
                reason: "gain is NaN".to_string(),
            },
            RenderError::InvalidDuration {
                workload: "Gain-default".to_string(),
                seconds: -1.0,
            },
            RenderError::InvalidSampleRate {
                workload: "Gain-default".to_string(),
                sample_rate: 0.0,
            },
        ];
        for err in errors {
            let converted = WorkloadError::from(err);
            assert_eq!(converted.workload(), "Gain-default");
        }
    }

    #[test]
    fn test_sample_rate_cause_is_kept() {
        let err = WorkloadError::from(RenderError::InvalidSampleRate {
            workload: "Delay-0.1".to_string(),
            sample_rate: -44100.0,
        });
        assert!(err.to_string().contains("invalid sample rate -44100"));
    }
}
