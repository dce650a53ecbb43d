use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sha2::Sha256;
use stale_merkle::{verify_proof, Proof, Tree};

pub fn generate_random_payload() -> Vec<u8> {
    let mut payload = Vec::with_capacity(32);
    for _ in 0..32 {
        payload.push(rand::random());
    }
    payload
}

fn setup_tree(num_leaves: usize) -> (Tree<Sha256>, Vec<Vec<u8>>) {
    let mut tree = Tree::<Sha256>::new();
    let mut digests = Vec::with_capacity(num_leaves);
    for _ in 0..num_leaves {
        digests.push(tree.insert(generate_random_payload()).unwrap());
    }
    (tree, digests)
}

fn bench_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Proof Generation");

    // Setup tree with 100 leaves
    let (tree, digests) = setup_tree(100);

    group.bench_function("100 leaves", |b| {
        b.iter(|| {
            for digest in &digests {
                black_box(tree.generate_proof(digest)).unwrap();
            }
        })
    });

    // Resolve every leaf through a stale digest
    let (mut stale_tree, stale_digests) = setup_tree(100);
    for digest in &stale_digests {
        stale_tree
            .update(generate_random_payload(), digest)
            .unwrap();
    }
    group.bench_function("100 leaves, stale digests", |b| {
        b.iter(|| {
            for digest in &stale_digests {
                black_box(stale_tree.generate_proof(digest)).unwrap();
            }
        })
    });

    group.finish();
}

fn bench_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Proof Verification");

    let (tree, digests) = setup_tree(100);
    let root = tree.root_hash().unwrap().to_vec();
    let proofs: Vec<_> = digests
        .iter()
        .map(|digest| tree.generate_proof(digest).unwrap())
        .collect();

    group.bench_function("100 leaves", |b| {
        b.iter(|| {
            for proof in &proofs {
                assert!(black_box(verify_proof(Some(proof), &root)));
            }
        })
    });

    let encoded: Vec<_> = proofs.iter().map(|proof| proof.encode()).collect();
    group.bench_function("100 leaves, decode and verify", |b| {
        b.iter(|| {
            for bytes in &encoded {
                let proof = Proof::<Sha256>::decode(bytes).unwrap();
                assert!(black_box(proof.verify(&root)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_proof_generation, bench_proof_verification);
criterion_main!(benches);
