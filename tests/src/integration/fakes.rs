//! Renderers standing in for the offline renderer.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{WorkloadError, WorkloadSpec};
use wb_02_bench_engine::WorkloadRenderer;

/// Reports exactly one microsecond per unit per rendered second, so every
/// normalized cost is 1 when the baseline costs nothing.
#[derive(Debug, Default)]
pub struct UnitCostRenderer {
    pub fail: Option<&'static str>,
}

#[async_trait]
impl WorkloadRenderer for UnitCostRenderer {
    async fn render_workload(&self, spec: &WorkloadSpec, seconds: f64) -> Result<f64, WorkloadError> {
        if self.fail == Some(spec.name) {
            return Err(WorkloadError::Build {
                workload: spec.name.to_string(),
                cause: "No such test name".to_string(),
            });
        }
        if spec.name == shared_types::BASELINE_NAME {
            return Ok(0.0);
        }
        Ok(f64::from(spec.unit_count) * seconds / 1e6)
    }
}

/// Panics if a render starts while another is in flight, and records the
/// order of calls. Each render yields to the scheduler while "busy".
#[derive(Debug, Default)]
pub struct OverlapDetectingRenderer {
    in_flight: AtomicBool,
    pub calls: AtomicUsize,
    pub order: Mutex<Vec<(String, f64)>>,
}

#[async_trait]
impl WorkloadRenderer for OverlapDetectingRenderer {
    async fn render_workload(&self, spec: &WorkloadSpec, seconds: f64) -> Result<f64, WorkloadError> {
        assert!(
            !self.in_flight.swap(true, Ordering::SeqCst),
            "render of {} overlapped another",
            spec.name
        );
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.order.lock().push((spec.name.to_string(), seconds));
        tokio::time::sleep(Duration::from_millis(1)).await;
        self.in_flight.store(false, Ordering::SeqCst);
        Ok(0.001)
    }
}
