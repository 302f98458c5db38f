//! Benchmarks for profiling operations.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::explicit_iter_loop,
    missing_docs
)]

use std::sync::Arc;

use arrow::{
    array::{Float64Array, Int32Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dataready::{assess, correlation_matrix, summarize, ArrowDataset, ProfileConfig};

fn create_dataset(rows: usize) -> ArrowDataset {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int32, false),
        Field::new("segment", DataType::Utf8, true),
        Field::new("score", DataType::Float64, true),
        Field::new("weight", DataType::Float64, true),
    ]));

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let ids: Vec<i32> = (0..rows as i32).collect();
    let segments: Vec<Option<String>> = ids
        .iter()
        .map(|i| (i % 13 != 0).then(|| format!("seg_{}", i % 8)))
        .collect();
    #[allow(clippy::cast_lossless)]
    let scores: Vec<Option<f64>> = ids
        .iter()
        .map(|i| (i % 17 != 0).then_some(*i as f64 * 1.5))
        .collect();
    #[allow(clippy::cast_lossless)]
    let weights: Vec<f64> = ids.iter().map(|i| ((*i % 100) as f64).sqrt()).collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int32Array::from(ids)),
            Arc::new(StringArray::from(segments)),
            Arc::new(Float64Array::from(scores)),
            Arc::new(Float64Array::from(weights)),
        ],
    )
    .expect("Failed to create batch");

    ArrowDataset::from_batch(batch).expect("Failed to create dataset")
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for size in [100, 1_000, 10_000, 100_000].iter() {
        let dataset = create_dataset(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dataset, |b, ds| {
            b.iter(|| summarize(black_box(ds)).unwrap());
        });
    }

    group.finish();
}

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");

    for size in [100, 1_000, 10_000, 100_000].iter() {
        let dataset = create_dataset(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dataset, |b, ds| {
            b.iter(|| correlation_matrix(black_box(ds)).unwrap());
        });
    }

    group.finish();
}

fn bench_assess(c: &mut Criterion) {
    let dataset = create_dataset(10_000);
    let config = ProfileConfig::default();

    c.bench_function("assess_10k", |b| {
        b.iter(|| assess(black_box(&dataset), &config).unwrap());
    });
}

criterion_group!(benches, bench_summarize, bench_correlation, bench_assess);
criterion_main!(benches);
