//! Result table.

use serde::Serialize;

/// What a workload contributed to the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    /// Best per-unit cost.
    Measured { value: f64 },
    /// The workload failed; `cause` is the error message.
    Failed { cause: String },
}

impl TestOutcome {
    pub fn measured(value: f64) -> Self {
        TestOutcome::Measured { value }
    }

    pub fn failed(cause: impl Into<String>) -> Self {
        TestOutcome::Failed {
            cause: cause.into(),
        }
    }

    /// Scalar usable for scoring.
    pub fn value(&self) -> Option<f64> {
        match self {
            TestOutcome::Measured { value } => Some(*value),
            TestOutcome::Failed { .. } => None,
        }
    }

    /// Scalar shown to the user; failures display as zero.
    pub fn display_value(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TestOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Entry {
    name: String,
    outcome: TestOutcome,
}

/// Workload name to outcome, in run order. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    entries: Vec<Entry>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `outcome` under `name`. Re-recording a name replaces its
    /// outcome and keeps its original position.
    pub fn record(&mut self, name: impl Into<String>, outcome: TestOutcome) {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.outcome = outcome,
            None => self.entries.push(Entry { name, outcome }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TestOutcome> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.outcome)
    }

    /// Scoring scalar for `name`; `None` if absent or failed.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(TestOutcome::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestOutcome)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.outcome))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_failed()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<N: Into<String>> FromIterator<(N, f64)> for ResultTable {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        let mut table = ResultTable::new();
        for (name, value) in iter {
            table.record(name, TestOutcome::measured(value));
        }
        table
    }
}
