//! Result sinks

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::domain::{BenchmarkScore, WorkloadOutcome};
use crate::error::ScoreError;
use crate::ports::ResultSink;

/// One progress event of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BenchmarkEvent {
    Result { name: String, outcome: WorkloadOutcome },
    Score(BenchmarkScore),
    ScoreFailed(ScoreError),
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResultSink;

impl ResultSink for NoOpResultSink {
    fn on_result(&self, _: &str, _: &WorkloadOutcome) {}
    fn on_score(&self, _: &BenchmarkScore) {}
}

/// Logs one row per workload. Quartiles, mean and deviation are included
/// once the sample is large enough to show them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingResultSink;

impl ResultSink for TracingResultSink {
    fn on_result(&self, name: &str, outcome: &WorkloadOutcome) {
        match outcome {
            WorkloadOutcome::Completed { summary } if summary.show_details() => info!(
                workload = name,
                min = summary.min,
                q1 = summary.q1,
                median = summary.median,
                q3 = summary.q3,
                max = summary.max,
                mean = summary.mean,
                stddev = summary.stddev,
                "{name}: {:.3}",
                summary.min
            ),
            WorkloadOutcome::Completed { summary } => {
                info!(workload = name, min = summary.min, "{name}: {:.3}", summary.min)
            }
            WorkloadOutcome::Failed { cause } => {
                warn!(workload = name, %cause, "{name}: failed")
            }
        }
    }

    fn on_score(&self, score: &BenchmarkScore) {
        info!(table = %score.name, score = score.value, "{} score: {:.3}", score.name, score.value);
    }

    fn on_score_failed(&self, error: &ScoreError) {
        warn!(%error, "no score");
    }
}

/// Forwards events to an unbounded channel. A closed receiver is ignored;
/// the run does not depend on anyone listening.
#[derive(Debug, Clone)]
pub struct ChannelResultSink {
    tx: mpsc::UnboundedSender<BenchmarkEvent>,
}

impl ChannelResultSink {
    pub fn new(tx: mpsc::UnboundedSender<BenchmarkEvent>) -> Self {
        Self { tx }
    }

    /// A sink paired with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BenchmarkEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: BenchmarkEvent) {
        let _ = self.tx.send(event);
    }
}

impl ResultSink for ChannelResultSink {
    fn on_result(&self, name: &str, outcome: &WorkloadOutcome) {
        self.send(BenchmarkEvent::Result {
            name: name.to_string(),
            outcome: outcome.clone(),
        });
    }

    fn on_score(&self, score: &BenchmarkScore) {
        self.send(BenchmarkEvent::Score(score.clone()));
    }

    fn on_score_failed(&self, error: &ScoreError) {
        self.send(BenchmarkEvent::ScoreFailed(error.clone()));
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingResultSink {
    events: Mutex<Vec<BenchmarkEvent>>,
}

impl CollectingResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BenchmarkEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl ResultSink for CollectingResultSink {
    fn on_result(&self, name: &str, outcome: &WorkloadOutcome) {
        self.events.lock().push(BenchmarkEvent::Result {
            name: name.to_string(),
            outcome: outcome.clone(),
        });
    }

    fn on_score(&self, score: &BenchmarkScore) {
        self.events.lock().push(BenchmarkEvent::Score(score.clone()));
    }

    fn on_score_failed(&self, error: &ScoreError) {
        self.events
            .lock()
            .push(BenchmarkEvent::ScoreFailed(error.clone()));
    }
}
