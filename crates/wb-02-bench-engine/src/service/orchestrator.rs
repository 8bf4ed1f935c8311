//! Benchmark Orchestrator
//!
//! Runs the baseline, then each selected workload in catalog order, then
//! scores. The result table belongs to a single run and is returned in the
//! report; nothing is shared between runs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use shared_types::{WorkloadCatalog, WorkloadError, WorkloadSpec, BASELINE_NAME};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::scheduler::RepeatedTrialScheduler;
use super::trial::TrialRunner;
use crate::adapters::NoOpResultSink;
use crate::domain::{
    micros_per_rendered_second, Baseline, BenchSettings, BenchmarkReport, BenchmarkScore,
    DurationSample, ResultTable, ScoringTable, StatSummary, TestOutcome, WorkloadOutcome,
    WorkloadSummary,
};
use crate::error::BenchmarkError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{BenchmarkApi, ResultSink, WorkloadRenderer};

/// Benchmark service
///
/// Implements the `BenchmarkApi` port over an injected renderer. Runs on
/// one service are serialized, so at most one trial is in flight.
pub struct BenchmarkService<R: WorkloadRenderer> {
    renderer: Arc<R>,
    catalog: WorkloadCatalog,
    scoring: ScoringTable,
    sink: Arc<dyn ResultSink>,
    metrics: Arc<dyn MetricsRecorder>,
    defaults: BenchSettings,
    run_gate: AsyncMutex<()>,
}

/// Results accumulated during one run.
#[derive(Default)]
struct RunState {
    results: ResultTable,
    summaries: Vec<WorkloadSummary>,
}

impl<R: WorkloadRenderer> BenchmarkService<R> {
    /// Service over the standard catalog and mixed scoring table.
    pub fn new(renderer: Arc<R>) -> Self {
        Self {
            renderer,
            catalog: WorkloadCatalog::standard(),
            scoring: ScoringTable::mixed(),
            sink: Arc::new(NoOpResultSink),
            metrics: Arc::new(NoOpMetrics),
            defaults: BenchSettings::default(),
            run_gate: AsyncMutex::new(()),
        }
    }

    pub fn with_catalog(mut self, catalog: WorkloadCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringTable) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Settings `run_benchmark` starts from.
    pub fn with_defaults(mut self, defaults: BenchSettings) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn catalog(&self) -> &WorkloadCatalog {
        &self.catalog
    }

    pub fn scoring(&self) -> &ScoringTable {
        &self.scoring
    }

    /// Selected workloads in catalog order. The baseline always runs, so
    /// naming it is accepted and ignored.
    fn resolve_selection(&self, selected: &[String]) -> Result<Vec<&WorkloadSpec>, BenchmarkError> {
        if selected.is_empty() {
            return Err(BenchmarkError::invalid("Please select one or more tests"));
        }
        if let Some(unknown) = selected
            .iter()
            .find(|name| name.as_str() != BASELINE_NAME && !self.catalog.contains(name))
        {
            return Err(BenchmarkError::invalid(format!("Unknown workload: {unknown}")));
        }
        Ok(self
            .catalog
            .iter()
            .filter(|spec| selected.iter().any(|name| name == spec.name))
            .collect())
    }

    /// Run `trial_count` trials and convert to microseconds per rendered second.
    async fn measure(
        &self,
        scheduler: &RepeatedTrialScheduler<R>,
        spec: &WorkloadSpec,
        trial_count: u32,
        render_seconds: u32,
    ) -> Result<DurationSample, WorkloadError> {
        let seconds = spec.render_seconds(f64::from(render_seconds));
        info!("Running {}", spec.name);
        let raw = scheduler.run(spec, trial_count, seconds).await?;
        Ok(raw.map(|elapsed| micros_per_rendered_second(elapsed, seconds)))
    }

    fn record_summary(&self, state: &mut RunState, spec: &WorkloadSpec, summary: StatSummary) {
        info!(
            workload = spec.name,
            min = summary.min,
            median = summary.median,
            max = summary.max,
            "Test {}",
            spec.name
        );
        state
            .results
            .record(spec.name, TestOutcome::measured(summary.best()));
        state.summaries.push(WorkloadSummary {
            name: spec.name.to_string(),
            unit_count: spec.unit_count,
            summary,
        });
        self.metrics.record_workload(true);
        self.sink
            .on_result(spec.name, &WorkloadOutcome::Completed { summary });
    }

    fn record_failure(&self, state: &mut RunState, spec: &WorkloadSpec, cause: String) {
        warn!(workload = spec.name, error = %cause, "{} returned error", spec.name);
        state
            .results
            .record(spec.name, TestOutcome::failed(cause.clone()));
        self.metrics.record_workload(false);
        self.sink
            .on_result(spec.name, &WorkloadOutcome::Failed { cause });
    }

    /// Run one full benchmark.
    pub async fn execute(
        &self,
        selected: &[String],
        settings: &BenchSettings,
    ) -> Result<BenchmarkReport, BenchmarkError> {
        settings.validate()?;
        let chosen = self.resolve_selection(selected)?;

        let run_id = Uuid::new_v4();
        let span = info_span!("benchmark_run", %run_id, workloads = chosen.len());
        async {
            let _gate = match self.run_gate.try_lock() {
                Ok(gate) => gate,
                Err(_) => {
                    debug!("waiting for the previous run to finish");
                    self.run_gate.lock().await
                }
            };
            self.execute_selected(run_id, chosen, settings).await
        }
        .instrument(span)
        .await
    }

    async fn execute_selected(
        &self,
        run_id: Uuid,
        chosen: Vec<&WorkloadSpec>,
        settings: &BenchSettings,
    ) -> Result<BenchmarkReport, BenchmarkError> {
        let started_at = Utc::now();
        info!(
            trials = settings.trial_count,
            render_seconds = settings.render_seconds,
            "benchmark started"
        );

        let scheduler = RepeatedTrialScheduler::new(TrialRunner::new(
            self.renderer.clone(),
            self.metrics.clone(),
            settings.settle_delay,
        ));
        let mut state = RunState::default();

        let baseline_spec = self.catalog.baseline();
        let baseline_sample = self
            .measure(
                &scheduler,
                baseline_spec,
                settings.baseline_trial_count(),
                settings.render_seconds,
            )
            .instrument(info_span!("workload", name = baseline_spec.name))
            .await
            .map_err(|e| {
                error!(error = %e, "baseline failed, aborting run");
                self.metrics.record_workload(false);
                BenchmarkError::BaselineFailed(e)
            })?;
        let baseline_summary = StatSummary::from_sample(&baseline_sample).ok_or_else(|| {
            BenchmarkError::BaselineFailed(WorkloadError::Render {
                workload: baseline_spec.name.to_string(),
                cause: "no durations recorded".to_string(),
            })
        })?;
        let baseline = Baseline::new(baseline_summary.best());
        self.record_summary(&mut state, baseline_spec, baseline_summary);

        for spec in chosen {
            let measured = self
                .measure(&scheduler, spec, settings.trial_count, settings.render_seconds)
                .instrument(info_span!("workload", name = spec.name))
                .await;

            match measured {
                Ok(raw) => {
                    let normalized = baseline.normalize(&raw, spec.unit_count);
                    match StatSummary::from_sample(&normalized) {
                        Some(summary) => self.record_summary(&mut state, spec, summary),
                        None => self.record_failure(&mut state, spec, "no durations recorded".into()),
                    }
                }
                Err(e) => self.record_failure(&mut state, spec, e.to_string()),
            }
        }

        let score = self
            .scoring
            .score(&state.results, settings.negative_cost_policy);
        match &score {
            Ok(score) => {
                info!(score = score.value, "{} score {:.2}", score.name, score.value);
                self.metrics.record_score(score.value);
                self.sink.on_score(score);
            }
            Err(e) => {
                warn!(error = %e, "scoring failed");
                self.sink.on_score_failed(e);
            }
        }

        Ok(BenchmarkReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            settings: settings.clone(),
            baseline: baseline.value(),
            results: state.results,
            summaries: state.summaries,
            score,
        })
    }
}

#[async_trait]
impl<R: WorkloadRenderer + 'static> BenchmarkApi for BenchmarkService<R> {
    async fn run(
        &self,
        selected: &[String],
        settings: &BenchSettings,
    ) -> Result<BenchmarkReport, BenchmarkError> {
        self.execute(selected, settings).await
    }

    async fn run_benchmark(
        &self,
        selected: &[String],
        trial_count: u32,
        render_seconds: u32,
    ) -> Result<BenchmarkScore, BenchmarkError> {
        let settings = BenchSettings {
            trial_count,
            render_seconds,
            ..self.defaults.clone()
        };
        let report = self.execute(selected, &settings).await?;
        Ok(report.score?)
    }
}
