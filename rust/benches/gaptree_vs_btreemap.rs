use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use gaptree::{GapTree, GapTreeBuilder, RebalanceStrategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

fn random_keys(n: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..1_000_000)).collect()
}

fn insert_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    let keys = random_keys(10000, 1);

    group.bench_function("gap_tree_random_insert", |b| {
        b.iter(|| {
            let tree = GapTree::new();
            for key in &keys {
                tree.add(black_box(*key));
            }
            black_box(tree);
        })
    });

    group.bench_function("std_tree_random_insert", |b| {
        b.iter(|| {
            let mut tree = BTreeMap::new();
            for key in &keys {
                *tree.entry(black_box(*key)).or_insert(0usize) += 1;
            }
            black_box(tree);
        })
    });

    group.bench_function("gap_tree_sequential_insert", |b| {
        b.iter(|| {
            let tree = GapTree::new();
            tree.add_range(black_box(0..10000));
            black_box(tree);
        })
    });

    group.finish();
}

fn lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let keys = random_keys(10000, 2);

    let our_tree: GapTree<i32> = keys.iter().copied().collect();
    let std_tree: BTreeMap<i32, ()> = keys.iter().map(|k| (*k, ())).collect();
    let probes = random_keys(1000, 3);

    group.bench_function("gap_tree_contains", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(our_tree.contains(black_box(probe)));
            }
        })
    });

    group.bench_function("std_tree_contains", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(std_tree.contains_key(black_box(probe)));
            }
        })
    });

    group.finish();
}

fn churn_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    let keys = random_keys(5000, 4);
    let victims = random_keys(5000, 5);

    for strategy in [RebalanceStrategy::Four, RebalanceStrategy::Sixteen] {
        group.bench_function(format!("gap_tree_remove_add_local_{:?}", strategy), |b| {
            b.iter_batched(
                || {
                    let tree = GapTreeBuilder::new()
                        .local_strategy(strategy)
                        .build()
                        .unwrap();
                    tree.add_range(keys.iter().copied());
                    tree
                },
                |tree| {
                    for (old, new) in keys.iter().zip(&victims) {
                        tree.remove(old);
                        tree.add(*new);
                    }
                    black_box(tree);
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.bench_function("gap_tree_forced_rebalance", |b| {
        b.iter_batched(
            || {
                let tree: GapTree<i32> = (0..4000).collect();
                for odd in (1..4000).step_by(2) {
                    tree.remove(&odd);
                }
                tree
            },
            |tree| black_box(tree.rebalance()),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, insert_benchmark, lookup_benchmark, churn_benchmark);
criterion_main!(benches);
