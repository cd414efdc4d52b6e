use core::hint::black_box;
use core::time::Duration;
use std::collections::BTreeSet;

use criterion::measurement::Measurement;
use criterion::{
    criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion, PlotConfiguration,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use red_black_tree::RedBlackTree;

pub const MEASUREMENT_KIND: &str = "walltime";

pub fn create_measurement() -> impl Measurement {
    criterion::measurement::WallTime
}

/// Permutation of `0..count` shuffled with a fixed seed.
pub fn gen_permutation(count: usize, seed: u64) -> Vec<i32> {
    let mut vec: Vec<i32> = (0..count as i32).collect();
    vec.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    vec
}

fn insert<M: Measurement>(c: &mut Criterion<M>) {
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    let mut g = c.benchmark_group(format!("insert_{}", MEASUREMENT_KIND));
    g.plot_config(plot_config);

    for count in [100, 1_000, 10_000, 100_000] {
        let keys = gen_permutation(count, 1);

        g.bench_with_input(BenchmarkId::new("red_black_tree", count), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = RedBlackTree::new();
                tree.insert_all(keys.iter().copied());
                tree
            })
        });
        g.bench_with_input(BenchmarkId::new("std_btreeset", count), &keys, |b, keys| {
            b.iter(|| BTreeSet::from_iter(keys.iter().copied()))
        });
    }
    g.finish();
}

fn delete<M: Measurement>(c: &mut Criterion<M>) {
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    let mut g = c.benchmark_group(format!("delete_{}", MEASUREMENT_KIND));
    g.plot_config(plot_config);

    for count in [100, 1_000, 10_000, 100_000] {
        let keys = gen_permutation(count, 2);
        let order = gen_permutation(count, 3);
        let tree: RedBlackTree<i32> = keys.iter().copied().collect();
        let set = BTreeSet::from_iter(keys.iter().copied());

        g.bench_with_input(BenchmarkId::new("red_black_tree", count), &order, |b, order| {
            b.iter_batched_ref(
                || tree.clone(),
                |tree| tree.delete_all(order),
                criterion::BatchSize::LargeInput,
            )
        });
        g.bench_with_input(BenchmarkId::new("std_btreeset", count), &order, |b, order| {
            b.iter_batched_ref(
                || set.clone(),
                |set| order.iter().filter(|key| set.remove(*key)).count(),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    g.finish();
}

fn iterate<M: Measurement>(c: &mut Criterion<M>) {
    let mut g = c.benchmark_group(format!("iterate_{}", MEASUREMENT_KIND));

    for count in [1_000, 100_000] {
        let keys = gen_permutation(count, 4);
        let tree: RedBlackTree<i32> = keys.iter().copied().collect();
        let set = BTreeSet::from_iter(keys.iter().copied());

        g.bench_function(BenchmarkId::new("red_black_tree", count), |b| {
            b.iter(|| black_box(&tree).iter().fold(0i64, |acc, k| acc + i64::from(*k)))
        });
        g.bench_function(BenchmarkId::new("std_btreeset", count), |b| {
            b.iter(|| black_box(&set).iter().fold(0i64, |acc, k| acc + i64::from(*k)))
        });
    }
    g.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(1))
        .warm_up_time(Duration::from_millis(100))
        .with_measurement(create_measurement())
        ;
    targets = insert, delete, iterate
);
criterion_main!(benches);
