//! Criterion benchmarks for poco_core simulation
//!
//! Run with: cargo bench -p poco_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use poco_core::config::SimulationBuilder;
use poco_core::estimators::{SampleMean, StudentTMean};
use poco_core::generators::{BootstrapShifter, NormalMeanShifter};
use poco_core::seed::derive_seeds;
use poco_core::summary::summarize;

fn bench_seed_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("seed_derivation");

    for count in [1_000, 100_000, 1_000_000].iter() {
        group.bench_with_input(BenchmarkId::new("count", count), count, |b, &count| {
            b.iter(|| derive_seeds(black_box(42), black_box(count)))
        });
    }

    group.finish();
}

fn bench_sample_mean_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_mean_grid");
    group.sample_size(20);

    for workers in [1_i64, 4, -1].iter() {
        let mut runner = SimulationBuilder::new(
            SampleMean::new(0.95).unwrap(),
            NormalMeanShifter::default(),
        )
        .effect_grid(0.0, 0.5, 10)
        .simulations(500)
        .workers(*workers)
        .build()
        .unwrap();

        group.bench_with_input(BenchmarkId::new("workers", workers), workers, |b, _| {
            b.iter(|| runner.run().map(|table| table.len()))
        });
    }

    group.finish();
}

fn bench_student_t(c: &mut Criterion) {
    let mut runner = SimulationBuilder::new(
        StudentTMean::new(0.95).unwrap(),
        NormalMeanShifter::new(15, 0.0, 1.0),
    )
    .effect_sizes(vec![0.0, 0.5])
    .simulations(1_000)
    .build()
    .unwrap();

    c.bench_function("student_t_2x1000", |b| {
        b.iter(|| runner.run().map(|table| table.len()))
    });
}

fn bench_bootstrap(c: &mut Criterion) {
    let base: Vec<f64> = (0..200).map(|i| (i as f64).sin()).collect();
    let mut runner = SimulationBuilder::new(
        SampleMean::new(0.95).unwrap(),
        BootstrapShifter::new(base).unwrap(),
    )
    .effect_sizes(vec![0.0, 0.1, 0.2])
    .simulations(500)
    .build()
    .unwrap();

    c.bench_function("bootstrap_3x500", |b| {
        b.iter(|| runner.run().map(|table| table.len()))
    });
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");
    let mut runner = SimulationBuilder::new(
        SampleMean::new(0.95).unwrap(),
        NormalMeanShifter::default(),
    )
    .effect_grid(0.0, 0.5, 10)
    .simulations(1_000)
    .build()
    .unwrap();
    runner.run().unwrap();

    group.bench_function("override_confidence", |b| {
        let mut levels = [0.9, 0.95, 0.99].into_iter().cycle();
        b.iter(|| {
            let level = levels.next().unwrap_or(0.95);
            runner.override_confidence(black_box(level)).map(|t| t.len())
        })
    });

    group.bench_function("summarize", |b| {
        let table = runner.results().unwrap();
        b.iter(|| summarize(black_box(table)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_seed_derivation,
    bench_sample_mean_grid,
    bench_student_t,
    bench_bootstrap,
    bench_recompute,
);
criterion_main!(benches);
