//! Timed offline rendering.

use std::time::{Duration, Instant};

use shared_types::WorkloadSpec;
use tracing::debug;

use super::builder::build_graph;
use crate::error::RenderError;
use crate::ports::RenderApi;

/// Sample rate used by every workload.
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    pub sample_rate: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Result of one timed render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub workload: &'static str,
    pub frames: usize,
    /// Wall-clock time of the render, graph construction excluded.
    pub elapsed: Duration,
    /// Peak absolute destination sample.
    pub peak: f32,
}

impl RenderOutcome {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Renders workloads on the calling thread.
#[derive(Debug, Clone, Default)]
pub struct OfflineRenderer {
    config: RendererConfig,
}

impl OfflineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }
}

impl RenderApi for OfflineRenderer {
    fn render(&self, spec: &WorkloadSpec, seconds: f64) -> Result<RenderOutcome, RenderError> {
        if !(seconds.is_finite() && seconds > 0.0) {
            return Err(RenderError::InvalidDuration {
                workload: spec.name.to_string(),
                seconds,
            });
        }

        let mut graph = build_graph(spec, self.config.sample_rate)?;
        let frames = (seconds * self.config.sample_rate as f64).round() as usize;

        let started = Instant::now();
        let audio = graph.render(frames);
        let elapsed = started.elapsed();

        let outcome = RenderOutcome {
            workload: spec.name,
            frames: audio.frames(),
            elapsed,
            peak: audio.peak(),
        };
        debug!(
            workload = spec.name,
            frames = outcome.frames,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "render complete"
        );
        Ok(outcome)
    }
}
