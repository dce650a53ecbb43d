//! Trees built with hashers other than the default one

use sha2::{Digest as _, Sha256, Sha512};

use crate::{tests::tree::assert_invariants, Hasher, Tree, TreeError};

/// Fixed-width tree: branches are hashed again instead of concatenated.
impl Hasher for Sha512 {
    fn leaf_hash(payload: &[u8]) -> Vec<u8> {
        let mut hasher = Sha512::new();
        hasher.update([0x00]);
        hasher.update(payload);
        hasher.finalize()[..32].to_vec()
    }

    fn combine(left: &[u8], right: &[u8]) -> Vec<u8> {
        let mut hasher = Sha512::new();
        hasher.update([0x01]);
        hasher.update(left);
        hasher.update(right);
        hasher.finalize()[..32].to_vec()
    }
}

/// Refuses to digest empty payloads.
struct NoEmptyPayload;

impl Hasher for NoEmptyPayload {
    fn leaf_hash(payload: &[u8]) -> Vec<u8> {
        if payload.is_empty() {
            return Vec::new();
        }
        Sha256::leaf_hash(payload)
    }
}

#[test]
fn test_rehashing_tree_keeps_fixed_width() {
    let mut tree = Tree::<Sha512>::new();
    for i in 0..33_u8 {
        tree.insert(vec![i; 3]).unwrap();
        assert_eq!(tree.root_hash().unwrap().len(), 32);
        assert_invariants(&tree);
    }
}

#[test]
fn test_rehashing_tree_proofs() {
    let mut tree = Tree::<Sha512>::new();
    let digests = (0..12_u8)
        .map(|i| tree.insert(vec![i]).unwrap())
        .collect::<Vec<_>>();
    let updated = tree.update(b"updated".to_vec(), &digests[5]).unwrap();
    let root = tree.root_hash().unwrap().to_vec();

    for digest in digests.iter().chain(std::iter::once(&updated)) {
        let proof = tree.generate_proof(digest).unwrap();
        assert!(proof.verify(&root));
    }
    let proof = tree.generate_proof(&digests[5]).unwrap();
    assert_eq!(proof.hashes()[0], updated);
    assert!(!proof.verify(&Sha512::leaf_hash(b"updated")));
}

#[test]
fn test_same_payloads_different_hashers() {
    let mut sha256_tree = Tree::<Sha256>::new();
    let mut sha512_tree = Tree::<Sha512>::new();
    for payload in [b"A", b"B", b"C"] {
        sha256_tree.insert(payload.to_vec()).unwrap();
        sha512_tree.insert(payload.to_vec()).unwrap();
    }
    assert_ne!(sha256_tree.root_hash(), sha512_tree.root_hash());
    assert_eq!(sha256_tree.leaf_depths(), sha512_tree.leaf_depths());
}

#[test]
fn test_missing_leaf_digest() {
    let mut tree = Tree::<NoEmptyPayload>::new();
    assert_eq!(tree.insert(Vec::new()).unwrap_err(), TreeError::MissingDigest);
    assert!(tree.is_empty());

    let a = tree.insert(b"A".to_vec()).unwrap();
    tree.insert(b"B".to_vec()).unwrap();
    let root = tree.root_hash().unwrap().to_vec();
    assert_eq!(tree.insert(Vec::new()).unwrap_err(), TreeError::MissingDigest);
    assert_eq!(
        tree.update(Vec::new(), &a).unwrap_err(),
        TreeError::MissingDigest
    );
    assert_eq!(tree.root_hash().unwrap(), root);
    assert_eq!(tree.lookup(&a).unwrap().payload(), b"A");
    assert!(tree.history(&a).unwrap().is_empty());
    assert_eq!(tree.len(), 2);
}
