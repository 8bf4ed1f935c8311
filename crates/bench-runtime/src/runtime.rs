//! # Bench Runtime
//!
//! Builds the engine over the offline renderer and runs one benchmark.

use std::sync::Arc;

use anyhow::{Context, Result};
use shared_types::WorkloadCatalog;
use tracing::info;
use wb_01_offline_renderer::OfflineRenderer;
use wb_02_bench_engine::{
    BenchmarkApi, BenchmarkReport, BenchmarkService, MetricsSnapshot, ResultSink,
    TracingResultSink, DETAIL_THRESHOLD,
};

use crate::adapters::{OfflineRendererAdapter, PrometheusMetrics, TableResultSink};
use crate::config::RuntimeConfig;

/// The wired benchmark runtime.
pub struct BenchRuntime {
    config: RuntimeConfig,
    service: BenchmarkService<OfflineRendererAdapter>,
    metrics: Arc<PrometheusMetrics>,
    table: Option<Arc<TableResultSink<std::io::Stdout>>>,
}

impl BenchRuntime {
    /// Wire the runtime. With `--json` results are logged instead of
    /// printed, so stdout carries only the report.
    pub fn new(config: RuntimeConfig) -> Self {
        let metrics = Arc::new(PrometheusMetrics::new());
        let table = (!config.json).then(|| Arc::new(TableResultSink::stdout()));
        let sink: Arc<dyn ResultSink> = match &table {
            Some(table) => table.clone(),
            None => Arc::new(TracingResultSink),
        };

        let service = BenchmarkService::new(Arc::new(OfflineRendererAdapter::default()))
            .with_sink(sink)
            .with_metrics(metrics.clone());

        Self {
            config,
            service,
            metrics,
            table,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn catalog(&self) -> &WorkloadCatalog {
        self.service.catalog()
    }

    /// Catalog listing, one `name units` line per workload.
    pub fn catalog_listing(&self) -> Vec<String> {
        let catalog = self.catalog();
        std::iter::once(catalog.baseline())
            .chain(catalog.iter())
            .map(|spec| format!("{} {}", spec.name, spec.unit_count))
            .collect()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Run the selected workloads.
    pub async fn run(&self) -> Result<BenchmarkReport> {
        let settings = self
            .config
            .bench_settings()
            .context("invalid benchmark settings")?;
        let selected = self.config.selection(self.catalog());
        info!(
            workloads = selected.len(),
            runs = settings.trial_count,
            seconds = settings.render_seconds,
            "starting benchmark"
        );

        if let Some(table) = &self.table {
            table.write_header(settings.trial_count as usize >= DETAIL_THRESHOLD);
        }

        let report = self
            .service
            .run(&selected, &settings)
            .await
            .context("benchmark run failed")?;

        let snapshot = self.metrics();
        info!(
            run_id = %report.run_id,
            trials = snapshot.trials_succeeded,
            failed_workloads = report.failed_count(),
            elapsed_ms = report.elapsed().num_milliseconds(),
            "benchmark finished"
        );
        Ok(report)
    }
}
