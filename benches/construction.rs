use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use suffixtree_rs::SuffixTree;

/// Highly repetitive data: long periodic runs force deep internal
/// chains and many splits.
fn generate_periodic(size: usize) -> Vec<u8> {
    let pattern = b"abcabd";
    let mut data: Vec<u8> = pattern.iter().copied().cycle().take(size).collect();
    data.push(0); // unique terminator
    data
}

/// English-like text with moderate repetition.
fn generate_text(size: usize) -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog ";
    let mut data: Vec<u8> = pattern.iter().copied().cycle().take(size).collect();
    data.push(0);
    data
}

/// Low-repetition data from a simple LCG, avoiding the terminator byte.
fn generate_random(size: usize) -> Vec<u8> {
    let mut seed = 12345u64;
    let mut data = Vec::with_capacity(size + 1);
    for _ in 0..size {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        data.push(1 + (seed % 255) as u8);
    }
    data.push(0);
    data
}

fn bench_construction(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 100_000];
    let generators: [(&str, fn(usize) -> Vec<u8>); 3] = [
        ("periodic", generate_periodic),
        ("text", generate_text),
        ("random", generate_random),
    ];

    for (name, generate) in generators {
        let mut group = c.benchmark_group(format!("construction_{name}"));
        for size in sizes.iter() {
            let data = generate(*size);
            group.bench_with_input(BenchmarkId::new("SuffixTree", size), &data, |b, data| {
                b.iter(|| {
                    let tree = SuffixTree::from_sequence(black_box(data.iter().copied()));
                    black_box(tree)
                });
            });
        }
        group.finish();
    }
}

fn bench_queries(c: &mut Criterion) {
    let sizes = [1_000, 10_000];
    let mut group = c.benchmark_group("queries");

    for size in sizes.iter() {
        let data = generate_text(*size);
        let tree = SuffixTree::from_sequence(data.iter().copied());
        let window = &data[data.len() / 2..data.len() / 2 + 20.min(data.len() / 2)];

        group.bench_with_input(BenchmarkId::new("contains", size), &tree, |b, tree| {
            b.iter(|| black_box(tree.contains(black_box(window)).unwrap()));
        });

        group.bench_with_input(
            BenchmarkId::new("longest_repeated", size),
            &tree,
            |b, tree| {
                b.iter(|| black_box(tree.longest_repeated().unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_construction, bench_queries);
criterion_main!(benches);
