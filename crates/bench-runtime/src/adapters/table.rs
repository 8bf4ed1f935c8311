//! Progressive result table.

use std::io::{self, Write};

use parking_lot::Mutex;
use tracing::warn;
use wb_02_bench_engine::{BenchmarkScore, ResultSink, ScoreError, WorkloadOutcome};

const NAME_WIDTH: usize = 44;
const VALUE_WIDTH: usize = 12;
const DETAIL_COLUMNS: [&str; 6] = ["Q1", "Median", "Q3", "Max", "Mean", "StdDev"];

/// Column header. Detail columns only mean something for runs with enough
/// trials, so they are optional.
pub fn format_header(details: bool) -> String {
    let mut line = format!("{:<NAME_WIDTH$}{:>VALUE_WIDTH$}", "Test", "Min");
    if details {
        for column in DETAIL_COLUMNS {
            line.push_str(&format!("{column:>VALUE_WIDTH$}"));
        }
    }
    line
}

/// One table row. Order statistics print in whole microseconds, mean and
/// stddev with two decimals. Failed workloads show 0 and the cause.
pub fn format_row(name: &str, outcome: &WorkloadOutcome) -> String {
    match outcome {
        WorkloadOutcome::Completed { summary } => {
            let mut line = format!("{name:<NAME_WIDTH$}{:>VALUE_WIDTH$.0}", summary.min);
            if summary.show_details() {
                for value in [summary.q1, summary.median, summary.q3, summary.max] {
                    line.push_str(&format!("{value:>VALUE_WIDTH$.0}"));
                }
                for value in [summary.mean, summary.stddev] {
                    line.push_str(&format!("{value:>VALUE_WIDTH$.2}"));
                }
            }
            line
        }
        WorkloadOutcome::Failed { cause } => {
            format!("{name:<NAME_WIDTH$}{:>VALUE_WIDTH$}  {cause}", 0)
        }
    }
}

/// Writes rows as workloads finish.
pub struct TableResultSink<W: Write + Send> {
    out: Mutex<W>,
}

impl TableResultSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TableResultSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Print the header. Call once before the run starts.
    pub fn write_header(&self, details: bool) {
        self.write_line(&format_header(details));
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock();
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            warn!(error = %e, "failed to write result row");
        }
    }
}

impl<W: Write + Send> ResultSink for TableResultSink<W> {
    fn on_result(&self, name: &str, outcome: &WorkloadOutcome) {
        self.write_line(&format_row(name, outcome));
    }

    fn on_score(&self, score: &BenchmarkScore) {
        self.write_line(&format!(
            "{:<NAME_WIDTH$}{:>VALUE_WIDTH$.3}",
            score.name, score.value
        ));
    }

    fn on_score_failed(&self, error: &ScoreError) {
        self.write_line(&format!("No score: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wb_02_bench_engine::StatSummary;

    fn summary(values: &[f64]) -> WorkloadOutcome {
        WorkloadOutcome::Completed {
            summary: StatSummary::from_values(values).unwrap(),
        }
    }

    #[test]
    fn test_short_sample_has_min_only() {
        let row = format_row("Gain-default", &summary(&[3.0, 2.2]));
        assert!(row.starts_with("Gain-default"));
        assert!(row.ends_with(" 2"));
        assert_eq!(row.len(), NAME_WIDTH + VALUE_WIDTH);
    }

    #[test]
    fn test_large_sample_has_details() {
        let row = format_row("Delay-0.1", &summary(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(row.len(), NAME_WIDTH + VALUE_WIDTH * 7);
        assert_eq!(format_header(true).len(), row.len());
    }

    #[test]
    fn test_mean_and_stddev_keep_two_decimals() {
        // mean 4, stddev sqrt(7.5) = 2.7386
        let row = format_row("Delay-0.1", &summary(&[1.0, 2.0, 4.0, 5.0, 8.0]));
        let cells: Vec<&str> = row["Delay-0.1".len()..].split_whitespace().collect();
        assert_eq!(cells, vec!["1", "2", "4", "5", "8", "4.00", "2.74"]);
    }

    #[test]
    fn test_failed_row_shows_zero_and_cause() {
        let row = format_row(
            "Convolver-32768f-743ms",
            &WorkloadOutcome::Failed {
                cause: "boom".to_string(),
            },
        );
        assert!(row.contains(" 0  boom"));
        assert!(row.ends_with("boom"));
    }

    #[test]
    fn test_sink_writes_rows_in_order() {
        let sink = TableResultSink::new(Vec::new());
        sink.write_header(false);
        sink.on_result("a", &summary(&[1.0]));
        sink.on_score(&BenchmarkScore {
            name: "MixedBenchmark".to_string(),
            value: 2.0,
        });

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Test"));
        assert!(lines[1].starts_with('a'));
        assert!(lines[2].starts_with("MixedBenchmark"));
    }
}
