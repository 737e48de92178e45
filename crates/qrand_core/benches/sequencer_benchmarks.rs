//! Criterion benchmarks for qrand_core sequence generation.
//!
//! Measures raw point generation, the derived distributions, checkpointing
//! and skipping across dimensionalities to characterise scaling behaviour.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DMatrix;
use qrand_core::batch::uniform_batch;
use qrand_core::covariance::sqrt_covariance;
use qrand_core::rng::ScrambleRng;
use qrand_core::QRandSequencer;

fn seeded(dimensionality: usize) -> QRandSequencer {
    QRandSequencer::new(dimensionality, &mut ScrambleRng::from_seed(42)).unwrap()
}

/// Benchmark raw counter advancement.
fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for dim in [1, 10, 100, 1000] {
        let mut seq = seeded(dim);
        group.bench_with_input(BenchmarkId::new("point", dim), &dim, |b, _| {
            b.iter(|| black_box(seq.advance()));
        });

        // Reusing buffers avoids the per-point allocation
        let mut seq = seeded(dim);
        let padded = seq.padded_dimensionality();
        let mut values = vec![0u64; padded];
        let mut max_values = vec![0u64; padded];
        group.bench_with_input(BenchmarkId::new("into", dim), &dim, |b, _| {
            b.iter(|| {
                seq.advance_into(black_box(&mut values), black_box(&mut max_values))
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark the distribution adapters.
fn bench_distributions(c: &mut Criterion) {
    let mut group = c.benchmark_group("distributions");

    for dim in [2, 32, 256] {
        let mut seq = seeded(dim);
        group.bench_with_input(BenchmarkId::new("uniform", dim), &dim, |b, _| {
            b.iter(|| seq.uniform_vector(black_box(-1.0), black_box(1.0)).unwrap());
        });

        let mut seq = seeded(dim);
        group.bench_with_input(BenchmarkId::new("integer", dim), &dim, |b, _| {
            b.iter(|| seq.integer_vector(black_box(0), black_box(1_000)).unwrap());
        });

        let mut seq = seeded(dim);
        group.bench_with_input(BenchmarkId::new("gaussian", dim), &dim, |b, _| {
            b.iter(|| seq.gaussian_standard().unwrap());
        });

        let mut seq = seeded(dim);
        let center = vec![0.0; dim];
        let covariance = DMatrix::from_fn(dim, dim, |i, j| if i == j { 1.0 } else { 0.1 });
        let root = sqrt_covariance(&covariance).unwrap();
        group.bench_with_input(BenchmarkId::new("correlated", dim), &dim, |b, _| {
            b.iter(|| seq.gaussian_correlated(&center, black_box(&root)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("sqrt_covariance", dim), &covariance, |b, c| {
            b.iter(|| sqrt_covariance(black_box(c)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark state serialisation and skipping.
fn bench_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("state");

    for dim in [10, 100, 1000] {
        let mut seq = seeded(dim);
        seq.skip(1_000_000);
        let text = seq.to_state_string();

        group.bench_with_input(BenchmarkId::new("save", dim), &seq, |b, seq| {
            b.iter(|| black_box(seq.to_state_string()));
        });
        group.bench_with_input(BenchmarkId::new("load", dim), &text, |b, text| {
            b.iter(|| QRandSequencer::from_state_str(black_box(text)).unwrap());
        });

        let mut seq = seeded(dim);
        group.bench_with_input(BenchmarkId::new("skip", dim), &dim, |b, _| {
            b.iter(|| seq.skip(black_box(1_000_003)));
        });
    }

    group.finish();
}

/// Benchmark parallel batches against their size.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniform_batch");

    for n in [1_000, 10_000, 100_000] {
        let mut seq = seeded(8);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| uniform_batch(&mut seq, n, 0.0, 1.0).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance, bench_distributions, bench_state, bench_batch);
criterion_main!(benches);
