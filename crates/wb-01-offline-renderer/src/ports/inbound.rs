//! Inbound Ports (Driving Ports)

use shared_types::WorkloadSpec;

use crate::error::RenderError;
use crate::service::RenderOutcome;

/// Offline rendering API.
///
/// Synchronous and CPU-bound: callers on an async runtime should run it on a
/// blocking thread.
pub trait RenderApi: Send + Sync {
    /// Build the graph for `spec` and render `seconds` of audio, timing only
    /// the render itself.
    fn render(&self, spec: &WorkloadSpec, seconds: f64) -> Result<RenderOutcome, RenderError>;
}
