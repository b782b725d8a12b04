//! Benchmarks for indexing operations (trie, popularity, facade).
//!
//! Run with: `cargo bench -p unihub-core --bench indexing`
//!
//! These benchmarks measure the performance of:
//! - Single resource insertion into a populated index
//! - Batch index construction
//! - Prefix trie insertion in isolation
//! - Download increments re-keying the popularity ranking

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use unihub_core::config::DEFAULT_RESOURCE_TYPES;
use unihub_core::index::prefix::PrefixIndex;
use unihub_core::{IndexConfig, ResourceIndex, ResourceRecord};

// =============================================================================
// Test Data Generation
// =============================================================================

const SUBJECTS: [&str; 6] = ["CSE201", "CSE202", "CSE301", "MTH101", "PHY102", "ECE210"];

const TOPICS: [&str; 8] = [
    "Data Structures",
    "Algorithms",
    "Operating Systems",
    "Linear Algebra",
    "Computer Networks",
    "Digital Logic",
    "Probability",
    "Compiler Design",
];

/// Create a deterministic resource laid out like an uploaded file.
fn create_record(id: u64) -> ResourceRecord {
    let subject = SUBJECTS[(id % SUBJECTS.len() as u64) as usize];
    let resource_type = DEFAULT_RESOURCE_TYPES[(id % DEFAULT_RESOURCE_TYPES.len() as u64) as usize];
    let topic = TOPICS[(id % TOPICS.len() as u64) as usize];

    ResourceRecord::new(
        format!("resources/{subject}/{resource_type}/{id:06}.pdf"),
        format!("{topic} Part {}", id % 13),
    )
    .with_type(resource_type)
    .with_subject(subject)
    .with_uploader(format!("user{}", id % 50))
    .with_download_count(id % 97)
    .with_tags([topic.to_lowercase(), format!("unit{}", id % 5)])
    .with_upload_time(1_700_000_000 + id)
}

fn build_index(size: u64) -> ResourceIndex {
    let mut index = ResourceIndex::new();
    for i in 0..size {
        index.add_resource(create_record(i)).expect("bench setup");
    }
    index
}

// ============================================================================
// Facade Benchmarks
// ============================================================================

/// Benchmark: Single resource insertion into a populated index
///
/// Every secondary structure is updated, so this is the per-upload cost.
fn bench_add_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/add_single");
    group.sample_size(100);

    for base_size in [0u64, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("base_{}", base_size)),
            &base_size,
            |b, &base_size| {
                b.iter_batched(
                    || (build_index(base_size), create_record(base_size)),
                    |(mut index, record)| {
                        index.add_resource(black_box(record)).expect("fresh id");
                        index
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

/// Benchmark: Building an index from scratch
///
/// Matches startup, where every stored file is indexed in one pass.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/build");
    group.sample_size(10);

    for size in [1_000u64, 5_000, 20_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let records: Vec<_> = (0..size).map(create_record).collect();

            b.iter(|| {
                ResourceIndex::from_records(IndexConfig::default(), records.iter().cloned())
            });
        });
    }
    group.finish();
}

// ============================================================================
// Structure Benchmarks
// ============================================================================

/// Benchmark: Trie insertion alone
///
/// Display names share long prefixes, which is the trie's common case.
fn bench_trie_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix/insert_batch");

    for size in [1_000u64, 10_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let names: Vec<_> = (0..size)
                .map(|i| format!("{} Part {}", TOPICS[(i % 8) as usize], i))
                .collect();

            b.iter(|| {
                let mut trie = PrefixIndex::new();
                for name in &names {
                    trie.insert(name);
                }
                trie
            });
        });
    }
    group.finish();
}

/// Benchmark: Download increments
///
/// Each increment moves one entry in the popularity ranking; cost should
/// stay logarithmic as the index grows.
fn bench_increment_download(c: &mut Criterion) {
    let mut group = c.benchmark_group("popularity/increment");

    for size in [1_000u64, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut index = build_index(size);
            let ids: Vec<String> = index.ids_in_order().map(|id| id.to_string()).collect();
            let mut next = 0usize;

            b.iter(|| {
                let id = &ids[next % ids.len()];
                next += 1;
                black_box(index.increment_download(id))
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_add_single,
    bench_build,
    bench_trie_insert,
    bench_increment_download,
);

criterion_main!(benches);
