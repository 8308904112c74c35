//! Benchmarks for scene tree operations

use arbor_scene::{Node, NodeId, SceneTree};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn wide_tree(count: usize) -> (SceneTree, NodeId) {
    let mut tree = SceneTree::with_capacity(count + 1);
    let root = tree.create("root");
    for i in 0..count {
        tree.spawn_child(root, Node::new(format!("child-{i}"))).unwrap();
    }
    (tree, root)
}

fn bench_build_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_build_wide");

    for count in [10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| black_box(wide_tree(count)));
        });
    }

    group.finish();
}

fn bench_build_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_build_nested");

    for depth in [2, 5, 10, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut tree = SceneTree::new();
                let mut current = tree.create("root");
                for level in 0..depth {
                    current = tree
                        .spawn_child(current, Node::new(format!("level-{level}")))
                        .unwrap();
                }
                black_box(tree)
            });
        });
    }

    group.finish();
}

fn bench_find_last(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_find_last");

    for count in [10, 100, 1000] {
        let (tree, root) = wide_tree(count);
        let target = format!("child-{}", count - 1);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(tree.find_child(root, black_box(&target))).is_ok());
        });
    }

    group.finish();
}

fn bench_iterate_children(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_iterate_children");

    for count in [10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        let (tree, root) = wide_tree(count);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let total: usize = tree
                    .children(root)
                    .unwrap()
                    .map(|child| child.name().len())
                    .sum();
                black_box(total)
            });
        });
    }

    group.finish();
}

fn bench_despawn(c: &mut Criterion) {
    c.bench_function("scene_despawn_1000", |b| {
        b.iter_batched(
            || wide_tree(1000),
            |(mut tree, root)| black_box(tree.despawn(root)),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_build_wide,
    bench_build_nested,
    bench_find_last,
    bench_iterate_children,
    bench_despawn
);
criterion_main!(benches);
