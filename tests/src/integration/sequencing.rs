//! # Trial sequencing and progress events
//!
//! Trials never overlap, run in catalog order with the baseline first, and
//! every workload produces exactly one progress event.

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use shared_types::{WorkloadCatalog, BASELINE_NAME};
    use wb_02_bench_engine::{
        BenchSettings, BenchmarkApi, BenchmarkEvent, BenchmarkService, ChannelResultSink,
        WorkloadOutcome,
    };

    use crate::integration::fakes::{OverlapDetectingRenderer, UnitCostRenderer};

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_trials_are_strictly_sequential() {
        let renderer = Arc::new(OverlapDetectingRenderer::default());
        let service = BenchmarkService::new(renderer.clone());
        let settings = BenchSettings::builder()
            .trial_count(4)
            .render_seconds(2)
            .settle_delay(Duration::from_millis(1))
            .baseline_trial_multiplier(2)
            .build()
            .unwrap();
        let selected = vec![
            "Convolver-32768f-743ms".to_string(),
            "Oscillator".to_string(),
            "Gain-default".to_string(),
        ];

        service.run(&selected, &settings).await.unwrap();

        assert_eq!(renderer.calls.load(Ordering::SeqCst), 8 + 3 * 4);
        let order = renderer.order.lock().clone();
        assert!(order[..8].iter().all(|(name, seconds)| name == BASELINE_NAME && *seconds == 8.0));

        let mut names: Vec<&str> = order[8..].iter().map(|(name, _)| name.as_str()).collect();
        names.dedup();
        assert_eq!(names, vec!["Oscillator", "Gain-default", "Convolver-32768f-743ms"]);

        let convolver_seconds = order.last().unwrap().1;
        assert!((convolver_seconds - 1.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_events_stream_from_spawned_run() {
        let (sink, mut rx) = ChannelResultSink::channel();
        let service = BenchmarkService::new(Arc::new(UnitCostRenderer::default()))
            .with_sink(Arc::new(sink));
        let selected: Vec<String> = WorkloadCatalog::standard()
            .select(Some("Delay"))
            .into_iter()
            .map(str::to_string)
            .collect();
        let settings = BenchSettings::builder()
            .trial_count(2)
            .render_seconds(1)
            .settle_delay(Duration::ZERO)
            .build()
            .unwrap();

        let expected = selected.len();
        let handle = tokio::spawn(async move { service.run(&selected, &settings).await });

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        let report = handle.await.unwrap().unwrap();

        assert_eq!(events.len(), 1 + expected + 1);
        assert!(matches!(&events[0], BenchmarkEvent::Result { name, .. } if name == BASELINE_NAME));
        assert!(events[1..=expected].iter().all(|event| matches!(
            event,
            BenchmarkEvent::Result {
                outcome: WorkloadOutcome::Completed { .. },
                ..
            }
        )));
        assert!(matches!(events.last(), Some(BenchmarkEvent::ScoreFailed(_))));
        assert_eq!(report.workload_count(), 1 + expected);
    }
}
