//! Benchmarks for the SlotArena generational storage

use arbor_core::alloc::{SlotArena, SlotKey};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_arena_insert");

    for size in [10, 100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut arena = SlotArena::new();
                for i in 0..size {
                    arena.insert(black_box(i));
                }
                arena
            });
        });
    }

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_arena_get");

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));

        let mut arena = SlotArena::new();
        let keys: Vec<SlotKey> = (0..size).map(|i| arena.insert(i as u64)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0u64;
                for &key in &keys {
                    if let Some(value) = arena.get(black_box(key)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    c.bench_function("slot_arena_churn_1000", |b| {
        b.iter(|| {
            let mut arena = SlotArena::new();
            let keys: Vec<_> = (0..1000).map(|i| arena.insert(i)).collect();
            for key in keys.iter().step_by(2) {
                arena.remove(*key);
            }
            for i in 0..500 {
                arena.insert(black_box(i));
            }
            black_box(arena.len())
        });
    });
}

criterion_group!(benches, bench_insert, bench_get, bench_churn);
criterion_main!(benches);
