//! # Adapter Implementations
//!
//! Concrete implementations of the engine's outbound ports:
//!
//! - `OfflineRendererAdapter`: `WorkloadRenderer` over the offline renderer
//! - `PrometheusMetrics`: `MetricsRecorder` feeding the Prometheus registry
//! - `TableResultSink`: `ResultSink` printing one table row per workload

pub mod metrics;
pub mod renderer;
pub mod table;

pub use metrics::PrometheusMetrics;
pub use renderer::OfflineRendererAdapter;
pub use table::{format_header, format_row, TableResultSink};
