//! Benchmarks for Memento store operations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use memento::{Config, Store, WriteStrategy};
use tempfile::TempDir;

fn populated_store(dir: &TempDir, entries: usize, strategy: WriteStrategy) -> Store {
    let config = Config::builder()
        .name("bench")
        .dir(dir.path())
        .write_strategy(strategy)
        .build();
    let mut store = Store::open_with_config(config).unwrap();
    for i in 0..entries {
        store.set_int(format!("key{}", i), i as i64).unwrap();
    }
    store
}

fn store_benchmarks(c: &mut Criterion) {
    // Every set rewrites the whole file, so cost grows with store size
    let mut group = c.benchmark_group("set_int");
    for entries in [10usize, 100, 1000] {
        let temp = TempDir::new().unwrap();
        let mut store = populated_store(&temp, entries, WriteStrategy::Truncate);
        group.bench_with_input(BenchmarkId::new("truncate", entries), &entries, |b, _| {
            b.iter(|| store.set_int("hot", black_box(42)).unwrap())
        });

        let temp = TempDir::new().unwrap();
        let mut store = populated_store(&temp, entries, WriteStrategy::AtomicRename);
        group.bench_with_input(BenchmarkId::new("atomic", entries), &entries, |b, _| {
            b.iter(|| store.set_int("hot", black_box(42)).unwrap())
        });
    }
    group.finish();

    let temp = TempDir::new().unwrap();
    let store = populated_store(&temp, 1000, WriteStrategy::Truncate);
    c.bench_function("get_int", |b| {
        b.iter(|| store.get_int(black_box("key500"), 0))
    });

    c.bench_function("open_1000", |b| {
        b.iter(|| Store::open("bench", temp.path()).unwrap())
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
