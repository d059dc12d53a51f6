//! Performance benchmarks for FastRsid
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fast_rsid::core::{
    parse_str, search_exact, search_many, search_prefix, RecordCollection,
};

/// Synthetic raw data file with `n` records in shuffled order
fn synthetic_file(n: usize) -> String {
    let mut text = String::from("# synthetic\n# rsid\tchromosome\tposition\tgenotype\n");
    for i in 0..n {
        // Multiplicative scramble so input order differs from sorted order
        let id = (i * 7_919) % (n * 10) + 1;
        text.push_str(&format!("rs{}\t{}\t{}\tA\tG\n", id, i % 22 + 1, i * 100));
    }
    text
}

fn sorted_collection(n: usize) -> RecordCollection {
    let mut collection = parse_str(&synthetic_file(n)).unwrap();
    collection.ensure_sorted();
    collection
}

/// Benchmark parsing (including the final sort)
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10_000usize, 100_000].iter() {
        let text = synthetic_file(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let collection = parse_str(black_box(text)).unwrap();
                black_box(collection)
            })
        });
    }

    group.finish();
}

/// Benchmark single exact lookups
fn bench_exact(c: &mut Criterion) {
    let collection = sorted_collection(600_000);

    c.bench_function("search_exact_hit", |b| {
        b.iter(|| black_box(search_exact(&collection, black_box("rs7919"))))
    });
    c.bench_function("search_exact_miss", |b| {
        b.iter(|| black_box(search_exact(&collection, black_box("rs0"))))
    });
}

/// Benchmark batch lookups
fn bench_batch(c: &mut Criterion) {
    let collection = sorted_collection(600_000);
    let ids: Vec<String> = (0..10_000).map(|i| format!("{}", i * 7_919 + 1)).collect();

    let mut group = c.benchmark_group("search_many");
    for size in [100usize, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(search_many(&collection, &ids[..size])))
        });
    }
    group.finish();
}

/// Benchmark live prefix search
fn bench_prefix(c: &mut Criterion) {
    let collection = sorted_collection(600_000);

    c.bench_function("search_prefix_limit_10", |b| {
        b.iter(|| black_box(search_prefix(&collection, black_box("rs12"), 10)))
    });
}

criterion_group!(benches, bench_parse, bench_exact, bench_batch, bench_prefix);
criterion_main!(benches);
