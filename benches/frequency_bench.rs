// Frequency annotation benchmarks

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use cochange::mining::annotate_frequencies;

mod common;

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate_frequencies");
    for size in [1_000, 10_000, 100_000] {
        let database = common::generate_database(size, size / 10);

        group.bench_with_input(BenchmarkId::new("transactions", size), &database, |b, db| {
            b.iter(|| {
                let mut db = db.clone();
                black_box(annotate_frequencies(&mut db))
            });
        });
    }
    group.finish();
}

fn bench_annotate_few_classes(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate_frequencies_few_classes");
    // Large equivalence classes
    for size in [10_000, 100_000] {
        let database = common::generate_database(size, 5);

        group.bench_with_input(BenchmarkId::new("transactions", size), &database, |b, db| {
            b.iter(|| {
                let mut db = db.clone();
                black_box(annotate_frequencies(&mut db))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_annotate, bench_annotate_few_classes);
criterion_main!(benches);
