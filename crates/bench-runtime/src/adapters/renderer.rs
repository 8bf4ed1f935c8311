//! Renderer adapter.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{WorkloadError, WorkloadSpec};
use wb_01_offline_renderer::{OfflineRenderer, RenderApi};
use wb_02_bench_engine::WorkloadRenderer;

/// Runs each render on the blocking pool so the runtime stays responsive.
/// The engine awaits every render before issuing the next one.
#[derive(Debug, Clone, Default)]
pub struct OfflineRendererAdapter {
    renderer: Arc<OfflineRenderer>,
}

impl OfflineRendererAdapter {
    pub fn new(renderer: OfflineRenderer) -> Self {
        Self {
            renderer: Arc::new(renderer),
        }
    }
}

#[async_trait]
impl WorkloadRenderer for OfflineRendererAdapter {
    async fn render_workload(&self, spec: &WorkloadSpec, seconds: f64) -> Result<f64, WorkloadError> {
        let renderer = Arc::clone(&self.renderer);
        let spec = *spec;
        let outcome = tokio::task::spawn_blocking(move || renderer.render(&spec, seconds))
            .await
            .map_err(|e| WorkloadError::Render {
                workload: spec.name.to_string(),
                cause: e.to_string(),
            })??;
        Ok(outcome.elapsed_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::WorkloadCatalog;

    #[tokio::test]
    async fn test_renders_catalog_workload() {
        let adapter = OfflineRendererAdapter::default();
        let catalog = WorkloadCatalog::standard();
        let spec = catalog.get("Gain-0.9").unwrap();
        let elapsed = adapter.render_workload(spec, 0.01).await.unwrap();
        assert!(elapsed.is_finite() && elapsed >= 0.0);
    }

    #[tokio::test]
    async fn test_invalid_duration_maps_to_workload_error() {
        let adapter = OfflineRendererAdapter::default();
        let catalog = WorkloadCatalog::standard();
        let err = adapter
            .render_workload(catalog.baseline(), 0.0)
            .await
            .unwrap_err();
        assert_eq!(err.workload(), "Baseline");
    }
}
