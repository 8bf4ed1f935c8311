//! # Standard catalog against the mixed score table
//!
//! With a renderer that costs exactly one microsecond per unit, every
//! normalized result is 1 and the composite score is total weight over
//! group count.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use bench_runtime::RuntimeConfig;
    use shared_types::WorkloadCatalog;
    use wb_02_bench_engine::{
        BenchSettings, BenchmarkApi, BenchmarkError, BenchmarkService, ScoreError, ScoringTable,
    };

    use crate::integration::fakes::UnitCostRenderer;

    fn all_workloads() -> Vec<String> {
        WorkloadCatalog::standard()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn settings() -> BenchSettings {
        BenchSettings::builder()
            .trial_count(3)
            .render_seconds(1)
            .settle_delay(Duration::ZERO)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_unit_costs_score_total_weight_over_groups() {
        let service = BenchmarkService::new(Arc::new(UnitCostRenderer::default()));
        let report = service.run(&all_workloads(), &settings()).await.unwrap();

        for (name, outcome) in report.results.iter().skip(1) {
            let value = outcome.value().unwrap();
            assert!((value - 1.0).abs() < 1e-9, "{name}: {value}");
        }
        let score = report.score.unwrap();
        assert_eq!(score.name, "MixedBenchmark");
        assert!((score.value - 91.0 / 7.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_failed_scored_workload_means_no_score() {
        let renderer = UnitCostRenderer {
            fail: Some("Oscillator"),
        };
        let service = BenchmarkService::new(Arc::new(renderer));

        let report = service.run(&all_workloads(), &settings()).await.unwrap();
        assert_eq!(report.failed_count(), 1);
        assert_eq!(
            report.score.unwrap_err(),
            ScoreError::MissingTestResult {
                name: "Oscillator".to_string()
            }
        );

        let err = service
            .run_benchmark(&all_workloads(), 1, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, BenchmarkError::Score(_)));
    }

    #[tokio::test]
    async fn test_failed_unscored_workload_keeps_score() {
        let renderer = UnitCostRenderer {
            fail: Some("Biquad-440"),
        };
        assert!(!ScoringTable::mixed().required_names().contains(&"Biquad-440"));

        let service = BenchmarkService::new(Arc::new(renderer));
        let report = service.run(&all_workloads(), &settings()).await.unwrap();
        assert!((report.score.unwrap().value - 91.0 / 7.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_pattern_selection_without_scored_members() {
        let catalog = WorkloadCatalog::standard();
        let config = RuntimeConfig {
            pattern: Some("Panner".to_string()),
            ..RuntimeConfig::default()
        };
        let selected = config.selection(&catalog);
        assert_eq!(selected.len(), 6);

        let service = BenchmarkService::new(Arc::new(UnitCostRenderer::default()));
        let report = service.run(&selected, &settings()).await.unwrap();
        assert_eq!(report.workload_count(), 7);
        assert!(report.score.is_err());
    }
}
