use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rank_list::RankList;
use std::collections::BTreeMap;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn filled_list(keys: &[i64]) -> RankList<i64, usize> {
    let mut list = RankList::with_capacity(keys.len());
    for (member, &key) in keys.iter().enumerate() {
        list.insert(key, member);
    }
    list
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter(|| {
            let mut list = RankList::new();
            for i in 0..N as i64 {
                list.insert(i, i);
            }
            list
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_reverse");

    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter(|| {
            let mut list = RankList::new();
            for i in (0..N as i64).rev() {
                list.insert(i, i);
            }
            list
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in (0..N as i64).rev() {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter(|| {
            let mut list = RankList::new();
            for (member, &key) in keys.iter().enumerate() {
                list.insert(key, member);
            }
            list
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for (member, &key) in keys.iter().enumerate() {
                map.insert(key, member);
            }
            map
        });
    });

    group.finish();
}

// ─── Update Benchmarks ──────────────────────────────────────────────────────

fn bench_repost_scores(c: &mut Criterion) {
    let keys = random_keys(N);
    let new_keys = random_keys(N * 2);

    let mut group = c.benchmark_group("repost_scores");

    // Every insert hits an existing member and repositions it.
    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter_batched(
            || filled_list(&keys),
            |mut list| {
                for (member, &key) in new_keys[N..].iter().enumerate() {
                    list.insert(key, member);
                }
                list
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Rank Query Benchmarks ──────────────────────────────────────────────────

fn bench_rank_of(c: &mut Criterion) {
    let keys = random_keys(N);
    let list = filled_list(&keys);

    let mut group = c.benchmark_group("rank_of");

    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter(|| {
            let mut sum = 0_usize;
            for member in 0..N {
                sum += list.rank_of(&member).unwrap();
            }
            sum
        });
    });

    group.finish();
}

fn bench_get_by_rank(c: &mut Criterion) {
    let keys = random_keys(N);
    let list = filled_list(&keys);

    let mut group = c.benchmark_group("get_by_rank");

    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter(|| {
            let mut sum = 0_i64;
            for rank in 1..=N {
                sum += list.get_by_rank(rank).map(|(&k, _)| k).unwrap();
            }
            sum
        });
    });

    group.finish();
}

// ─── Removal Benchmarks ─────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter_batched(
            || filled_list(&keys),
            |mut list| {
                for member in 0..N {
                    list.remove(&member);
                }
                list
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_remove_range(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("remove_range");

    // Trim the bottom half in one call.
    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter_batched(
            || filled_list(&keys),
            |mut list| {
                let len = list.len();
                list.remove_range(len / 2 + 1, len).unwrap();
                list
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Bounded Churn Benchmarks ───────────────────────────────────────────────

fn bench_bounded_churn(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("bounded_churn");

    // A top-100 board absorbing the full stream; most inserts either evict
    // the tail or get refused outright.
    group.bench_function(BenchmarkId::new("RankList", N), |b| {
        b.iter(|| {
            let mut list = RankList::with_max_len(100);
            for (member, &key) in keys.iter().enumerate() {
                list.insert(key, member);
            }
            list
        });
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_reverse, bench_insert_random,);

criterion_group!(update_benches, bench_repost_scores,);

criterion_group!(query_benches, bench_rank_of, bench_get_by_rank,);

criterion_group!(remove_benches, bench_remove_random, bench_remove_range,);

criterion_group!(bounded_benches, bench_bounded_churn,);

criterion_main!(
    insert_benches,
    update_benches,
    query_benches,
    remove_benches,
    bounded_benches,
);
