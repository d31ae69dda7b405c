//! Criterion benchmarks for the timing harness.
//!
//! Run with:
//! ```bash
//! cargo bench -p bigo-algo
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use bigo_algo::{measure, size_sequence, Registry};

// ── harness ─────────────────────────────────────────────────────────────────

fn bench_size_sequence(c: &mut Criterion) {
    c.bench_function("size_sequence_10k", |b| {
        b.iter(|| size_sequence(black_box(10), black_box(10_000), black_box(10)).unwrap())
    });
}

fn bench_measure(c: &mut Criterion) {
    let registry = Registry::builtin();
    let mut group = c.benchmark_group("measure");
    group.sample_size(10);

    for key in ["linear", "binary", "bubble", "nested"] {
        let algo = registry.get(key).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(key), &algo.run, |b, run| {
            b.iter(|| measure(*run, 10, 200, 10).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_size_sequence, bench_measure);
criterion_main!(benches);
