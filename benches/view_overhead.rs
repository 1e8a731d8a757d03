#![cfg(feature = "native")]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sublevel_store::prelude::*;

fn bench_insert_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [100, 1000, 5000].iter() {
        group.bench_with_input(BenchmarkId::new("raw_sled", size), size, |b, &size| {
            b.iter(|| {
                let config = sled::Config::new().temporary(true);
                let db = config.open().unwrap();

                for i in 0u64..size {
                    let key = format!("users!{i:08}");
                    db.insert(key.as_bytes(), format!("user {i}").as_bytes())
                        .unwrap();
                }
                black_box(db.len());
            });
        });

        group.bench_with_input(BenchmarkId::new("sublevel", size), size, |b, &size| {
            b.iter(|| {
                let store = SublevelStore::sled_temp().unwrap();
                let users = store.sublevel("users");

                for i in 0u64..size {
                    users.put(format!("{i:08}"), format!("user {i}")).unwrap();
                }
                black_box(store.kind());
            });
        });
    }

    group.finish();
}

fn bench_point_read_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_read");

    let store = SublevelStore::sled_temp().unwrap();
    let users = store.sublevel("users");
    for i in 0u64..10_000 {
        users.put(format!("{i:08}"), format!("user {i}")).unwrap();
    }

    group.bench_function("view_get", |b| {
        let view = store.view().subview("users");
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("{:08}", i % 10_000);
            i += 1;
            black_box(view.get(&key).unwrap());
        });
    });

    group.bench_function("keyspace_subkey_only", |b| {
        let keyspace = Keyspace::root().child(b"users");
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("{:08}", i % 10_000);
            i += 1;
            black_box(keyspace.subkey(key.as_bytes()));
        });
    });

    group.finish();
}

fn bench_range_scan_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_scan");

    for size in [1000u64, 10_000].iter() {
        let store = SublevelStore::sled_temp().unwrap();
        let users = store.sublevel("users");
        let other = store.sublevel("other");
        for i in 0..*size {
            users.put(format!("{i:08}"), format!("user {i}")).unwrap();
            other.put(format!("{i:08}"), "noise").unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("scoped_entries", size),
            size,
            |b, &size| {
                let view = store.view().subview("users");
                b.iter(|| {
                    let count = view.entries().unwrap().count();
                    assert_eq!(count as u64, size);
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("bounded_slice", size), size, |b, &size| {
            let view = store.view().subview("users");
            b.iter(|| {
                let count = view
                    .slice(Slice::new().start_at("").stop_before("~"))
                    .unwrap()
                    .count();
                assert_eq!(count as u64, size);
            });
        });
    }

    group.finish();
}

fn bench_memory_backend(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory");

    let store = SublevelStore::memory().unwrap();
    let users = store.sublevel("users");
    for i in 0u64..10_000 {
        users.put(format!("{i:08}"), format!("user {i}")).unwrap();
    }

    group.bench_function("view_get", |b| {
        let view = store.view().subview("users");
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("{:08}", i % 10_000);
            i += 1;
            black_box(view.get(&key).unwrap());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_overhead,
    bench_point_read_overhead,
    bench_range_scan_overhead,
    bench_memory_backend
);
criterion_main!(benches);
