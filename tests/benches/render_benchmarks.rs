//! # Renderer Benchmarks
//!
//! Offline render cost of representative workloads, plus the statistics
//! and scoring path of the engine.
//!
//! | Group | What is measured |
//! |-------|------------------|
//! | render | 0.1 s of audio per workload, graph construction included |
//! | reduce | `StatSummary` over 500 trial durations |
//! | score | Mixed score over a full result table |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::WorkloadCatalog;
use std::time::Duration;
use wb_01_offline_renderer::{OfflineRenderer, RenderApi};
use wb_02_bench_engine::{NegativeCostPolicy, ResultTable, ScoringTable, StatSummary};

const RENDER_SECONDS: f64 = 0.1;

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(20);

    let renderer = OfflineRenderer::new();
    let catalog = WorkloadCatalog::standard();
    let frames = (RENDER_SECONDS * 44_100.0) as u64;

    for name in [
        "Gain-default",
        "Biquad-default",
        "Delay-0.1",
        "WaveShaper-4x",
        "Compressor-knee-40",
        "Convolver-2048f-46ms",
        "Panner-HRTF",
    ] {
        let Some(spec) = catalog.get(name) else {
            continue;
        };
        group.throughput(Throughput::Elements(frames * u64::from(spec.unit_count)));
        group.bench_with_input(BenchmarkId::from_parameter(name), spec, |b, spec| {
            b.iter(|| black_box(renderer.render(spec, RENDER_SECONDS)))
        });
    }

    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    let values: Vec<f64> = (0..500).map(|i| ((i * 7919) % 500) as f64 * 0.37).collect();
    c.bench_function("reduce/stat_summary_500", |b| {
        b.iter(|| black_box(StatSummary::from_values(black_box(&values))))
    });
}

fn bench_score(c: &mut Criterion) {
    let table = ScoringTable::mixed();
    let results: ResultTable = WorkloadCatalog::standard()
        .names()
        .into_iter()
        .enumerate()
        .map(|(i, name)| (name, i as f64 * 0.5))
        .collect();

    c.bench_function("score/mixed_benchmark", |b| {
        b.iter(|| black_box(table.score(&results, NegativeCostPolicy::Retain)))
    });
}

criterion_group!(benches, bench_render, bench_reduce, bench_score);
criterion_main!(benches);
