//! Composite scorer.
//!
//! `score = Σ groups (Σ members value × weight) / group count`. Lower is
//! better: the score is a weighted average per-unit time.

use serde::Serialize;

use super::report::BenchmarkScore;
use super::results::ResultTable;
use super::settings::NegativeCostPolicy;
use crate::error::ScoreError;

/// A named node category with weighted member workloads.
///
/// Weights are the number of nodes of that variant a realistic graph would use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreGroup {
    pub name: &'static str,
    pub members: &'static [(&'static str, u32)],
}

/// Group table of the mixed benchmark. Each group costs roughly the same on
/// reference hardware so every node category has equal influence.
pub static MIXED_BENCHMARK: &[ScoreGroup] = &[
    ScoreGroup {
        name: "Gain",
        members: &[
            ("Gain-default", 20),
            ("Gain-0.9", 10),
            ("GainAutomation-exp-a-rate", 2),
            ("GainAutomation-linear-a-rate", 2),
            ("GainAutomation-target-a-rate", 2),
            ("GainAutomation-curve-a-rate", 2),
        ],
    },
    ScoreGroup {
        name: "BiquadFilter",
        members: &[
            ("Biquad-default", 5),
            ("BiquadAutomation-exp-a-rate", 1),
            ("BiquadAutomation-linear-a-rate", 1),
            ("BiquadAutomation-target-a-rate", 1),
            ("BiquadAutomation-curve-a-rate", 1),
        ],
    },
    ScoreGroup {
        name: "Delay",
        members: &[("Delay-0.1", 3)],
    },
    ScoreGroup {
        name: "WaveShaper",
        members: &[("WaveShaper-1x", 10)],
    },
    ScoreGroup {
        name: "Oscillator",
        members: &[("Oscillator", 5)],
    },
    ScoreGroup {
        name: "AudioBufferSource",
        members: &[("AudioBufferSource-rate1", 20), ("AudioBufferSource-rate0.9", 5)],
    },
    ScoreGroup {
        name: "Convolver",
        members: &[("Convolver-32768f-743ms", 1)],
    },
];

/// A named set of score groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringTable {
    name: String,
    groups: Vec<ScoreGroup>,
}

impl ScoringTable {
    pub fn new(name: impl Into<String>, groups: Vec<ScoreGroup>) -> Self {
        Self {
            name: name.into(),
            groups,
        }
    }

    /// The standard mixed benchmark.
    pub fn mixed() -> Self {
        Self::new("MixedBenchmark", MIXED_BENCHMARK.to_vec())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &[ScoreGroup] {
        &self.groups
    }

    /// Every workload name the table needs, in group order.
    pub fn required_names(&self) -> Vec<&'static str> {
        self.groups
            .iter()
            .flat_map(|g| g.members.iter().map(|(name, _)| *name))
            .collect()
    }

    /// Score `results`. Fails on the first member without a measured value;
    /// nothing is summed from an incomplete table.
    pub fn score(
        &self,
        results: &ResultTable,
        policy: NegativeCostPolicy,
    ) -> Result<BenchmarkScore, ScoreError> {
        if self.groups.is_empty() {
            return Err(ScoreError::NoGroups {
                table: self.name.clone(),
            });
        }

        let mut total = 0.0;
        for group in &self.groups {
            let mut group_score = 0.0;
            for &(name, weight) in group.members {
                let value = results.value(name).ok_or_else(|| ScoreError::MissingTestResult {
                    name: name.to_string(),
                })?;
                group_score += policy.apply(value) * f64::from(weight);
            }
            total += group_score;
        }

        Ok(BenchmarkScore {
            name: self.name.clone(),
            value: total / self.groups.len() as f64,
        })
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::mixed()
    }
}
