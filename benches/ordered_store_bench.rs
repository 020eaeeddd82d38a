//! OrderedStore benchmarks.
//!
//! Compares the ordered store against the unordered store for construction,
//! membership and removal, and measures the structural strategy's linear
//! lookup on a small set.
//!
//! Pre-generated Vecs are reused via clone() in setup so that input
//! generation is not measured.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use setwise::equality::Structural;
use setwise::store::{OrderedStore, UnorderedStore};
use std::hint::black_box;

const SIZES: [i32; 3] = [100, 1000, 10000];

fn generate_vec(size: i32) -> Vec<i32> {
    (0..size).collect()
}

fn batch_size_for(size: i32) -> BatchSize {
    if size < 1000 {
        BatchSize::SmallInput
    } else {
        BatchSize::LargeInput
    }
}

fn benchmark_construction(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("store_construction");

    for size in SIZES {
        let base_vec = generate_vec(size);
        group.bench_with_input(BenchmarkId::new("ordered", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || base_vec.clone(),
                |elements| black_box(elements.into_iter().collect::<OrderedStore<i32>>()),
                batch_size_for(size),
            );
        });
        group.bench_with_input(BenchmarkId::new("unordered", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || base_vec.clone(),
                |elements| black_box(elements.into_iter().collect::<UnorderedStore<i32>>()),
                batch_size_for(size),
            );
        });
    }

    group.finish();
}

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("store_contains");

    for size in SIZES {
        let ordered: OrderedStore<i32> = generate_vec(size).into_iter().collect();
        let unordered: UnorderedStore<i32> = generate_vec(size).into_iter().collect();

        group.bench_with_input(BenchmarkId::new("ordered", size), &size, |bencher, &size| {
            bencher.iter(|| {
                for element in (0..size).step_by(7) {
                    black_box(ordered.contains(black_box(&element)));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("unordered", size), &size, |bencher, &size| {
            bencher.iter(|| {
                for element in (0..size).step_by(7) {
                    black_box(unordered.contains(black_box(&element)));
                }
            });
        });
    }

    group.finish();
}

/// Removes every other element, which drives the ordered store through
/// tombstoning and compaction.
fn benchmark_remove_half(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("store_remove_half");

    for size in SIZES {
        let ordered: OrderedStore<i32> = generate_vec(size).into_iter().collect();
        let unordered: UnorderedStore<i32> = generate_vec(size).into_iter().collect();

        group.bench_with_input(BenchmarkId::new("ordered", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || ordered.clone(),
                |mut store| {
                    for element in (0..size).step_by(2) {
                        store.remove(&element);
                    }
                    black_box(store)
                },
                batch_size_for(size),
            );
        });
        group.bench_with_input(BenchmarkId::new("unordered", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || unordered.clone(),
                |mut store| {
                    for element in (0..size).step_by(2) {
                        store.remove(&element);
                    }
                    black_box(store)
                },
                batch_size_for(size),
            );
        });
    }

    group.finish();
}

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("ordered_store_iteration");

    for size in SIZES {
        let mut sparse: OrderedStore<i32> = generate_vec(size).into_iter().collect();
        sparse.retain(|element| element % 3 != 0);

        group.bench_with_input(BenchmarkId::new("sum", size), &sparse, |bencher, store| {
            bencher.iter(|| black_box(store.iter().copied().map(i64::from).sum::<i64>()));
        });
    }

    group.finish();
}

fn benchmark_structural_lookup(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("structural_lookup");

    for size in [8, 32, 128] {
        let store: OrderedStore<i32, Structural> = generate_vec(size).into_iter().collect();
        group.bench_with_input(BenchmarkId::new("contains_last", size), &store, |bencher, store| {
            bencher.iter(|| black_box(store.contains(black_box(&(size - 1)))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_construction,
    benchmark_contains,
    benchmark_remove_half,
    benchmark_iteration,
    benchmark_structural_lookup
);
criterion_main!(benches);
