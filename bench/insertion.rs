use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use sha2::Sha256;
use stale_merkle::Tree;

pub fn generate_random_payload() -> Vec<u8> {
    let mut payload = Vec::with_capacity(32);
    for _ in 0..32 {
        payload.push(rand::random());
    }
    payload
}

fn setup_tree(num_leaves: usize) -> (Tree<Sha256>, Vec<Vec<u8>>) {
    let mut tree = Tree::<Sha256>::with_capacity(num_leaves);
    let mut digests = Vec::with_capacity(num_leaves);
    for _ in 0..num_leaves {
        digests.push(tree.insert(generate_random_payload()).unwrap());
    }
    (tree, digests)
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tree Insertion");

    group.bench_function("100 leaves", |b| {
        b.iter(|| {
            let mut tree = Tree::<Sha256>::new();
            for _ in 0..100 {
                tree.insert(generate_random_payload()).unwrap();
            }
        })
    });

    // Digest index lookups on a bigger tree
    group.bench_function("Insert into 1000 leaves", |b| {
        b.iter_batched(
            || setup_tree(1000).0,
            |mut tree| {
                tree.insert(generate_random_payload()).unwrap();
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tree Update");

    group.bench_function("Update 100 leaves", |b| {
        b.iter_batched(
            || setup_tree(100),
            |(mut tree, digests)| {
                for digest in &digests {
                    tree.update(generate_random_payload(), digest).unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_insertion, bench_update);
criterion_main!(benches);
