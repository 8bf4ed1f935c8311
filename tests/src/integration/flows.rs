//! # Engine over the offline renderer
//!
//! Full runs with real rendering: the baseline is measured, each selected
//! workload is normalized against it, and the report is complete even when
//! the composite score cannot be computed.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use bench_runtime::adapters::OfflineRendererAdapter;
    use shared_types::{WorkloadCatalog, BASELINE_NAME};
    use wb_01_offline_renderer::{OfflineRenderer, RenderApi};
    use wb_02_bench_engine::{
        BenchSettings, BenchmarkApi, BenchmarkService, ScoreError, TestOutcome,
    };

    fn quick_settings(trials: u32) -> BenchSettings {
        BenchSettings::builder()
            .trial_count(trials)
            .render_seconds(1)
            .settle_delay(Duration::ZERO)
            .build()
            .unwrap()
    }

    #[test]
    fn test_every_catalog_workload_renders() {
        let renderer = OfflineRenderer::new();
        let catalog = WorkloadCatalog::standard();
        for spec in std::iter::once(catalog.baseline()).chain(catalog.iter()) {
            let outcome = renderer
                .render(spec, 0.01)
                .unwrap_or_else(|e| panic!("{} failed: {e}", spec.name));
            assert_eq!(outcome.frames, 441, "{}", spec.name);
            assert!(outcome.peak.is_finite(), "{}", spec.name);
        }
    }

    #[tokio::test]
    async fn test_selected_workloads_run_in_catalog_order() {
        let service = BenchmarkService::new(Arc::new(OfflineRendererAdapter::default()));
        let selected = vec!["Delay-0.1".to_string(), "Gain-0.9".to_string()];

        let report = service.run(&selected, &quick_settings(2)).await.unwrap();

        assert_eq!(
            report.results.names(),
            vec![BASELINE_NAME, "Gain-0.9", "Delay-0.1"]
        );
        assert!(report.baseline > 0.0);
        assert_eq!(report.summaries.len(), 3);
        for summary in &report.summaries {
            assert_eq!(summary.summary.count, 2);
            assert!(summary.summary.min <= summary.summary.max);
        }
        assert!(matches!(
            report.score,
            Err(ScoreError::MissingTestResult { .. })
        ));
    }

    #[tokio::test]
    async fn test_report_serializes() {
        let service = BenchmarkService::new(Arc::new(OfflineRendererAdapter::default()));
        let report = service
            .run(&["Oscillator".to_string()], &quick_settings(1))
            .await
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["settings"]["trial_count"], 1);
        assert!(json["results"].as_array().unwrap().len() == 2);
        assert!(matches!(
            report.results.get("Oscillator"),
            Some(TestOutcome::Measured { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_benchmark_requires_full_mixed_set() {
        let service = BenchmarkService::new(Arc::new(OfflineRendererAdapter::default()));
        let err = service
            .run_benchmark(&["Oscillator".to_string()], 1, 1)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No such test name"));
    }
}
