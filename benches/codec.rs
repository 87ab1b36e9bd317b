//! Benchmarks for Huffman compression and decompression.
//!
//! Run with: `cargo bench --bench codec`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use huffpack::{compress, decompress, HuffmanTree, WeightTable};

/// Text-like data with a skewed byte distribution.
fn generate_text(size: usize) -> Vec<u8> {
    let phrases: &[&[u8]] = &[
        b"The quick brown fox jumps over the lazy dog. ",
        b"Pack my box with five dozen liquor jugs! ",
        b"How vexingly quick daft zebras jump!! ",
    ];
    let mut data = Vec::with_capacity(size);
    let mut i = 0;
    while data.len() < size {
        data.extend_from_slice(phrases[i % phrases.len()]);
        i += 1;
    }
    data.truncate(size);
    data
}

/// Every byte value in turn; the flattest distribution possible.
fn generate_uniform(size: usize) -> Vec<u8> {
    (0..=255u8).cycle().take(size).collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for size in [4 * 1024, 64 * 1024, 1024 * 1024] {
        let text = generate_text(size);
        let uniform = generate_uniform(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("text", size), &text, |b, data| {
            b.iter(|| compress(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("uniform", size), &uniform, |b, data| {
            b.iter(|| compress(black_box(data)))
        });
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for size in [4 * 1024, 64 * 1024, 1024 * 1024] {
        let packed = compress(&generate_text(size)).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("text", size), &packed, |b, data| {
            b.iter(|| decompress(black_box(data)))
        });
    }

    group.finish();
}

fn bench_tree_build(c: &mut Criterion) {
    let weights = WeightTable::count(&generate_uniform(64 * 1024));
    c.bench_function("tree_build_256_symbols", |b| {
        b.iter(|| HuffmanTree::build(black_box(&weights)))
    });
}

criterion_group!(benches, bench_compress, bench_decompress, bench_tree_build);
criterion_main!(benches);
