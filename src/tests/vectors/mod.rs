mod types;

use std::fs;
use std::path::PathBuf;

use sha2::Sha256;

use crate::{tests::vectors::types::TestVectors, Hasher, Tree};

fn load_vectors() -> TestVectors {
    let path = PathBuf::from("src/tests/vectors/testdata/tree_vectors.json");
    let json = fs::read_to_string(&path).unwrap();
    serde_json::from_str::<TestVectors>(&json).unwrap()
}

#[test]
fn test_insertion_vectors() {
    let test_vectors = load_vectors();
    for case in &test_vectors.insertion_cases {
        let comment = case.comment.as_deref().unwrap_or("unnamed test");
        println!("Running test case: {}", comment);

        let mut tree = Tree::<Sha256>::new();
        for payload in &case.payloads {
            tree.insert(payload.as_bytes()).unwrap();
        }

        let expected_root = hex::decode(&case.root_hash).unwrap();
        assert_eq!(tree.root_hash().unwrap(), expected_root, "{}", comment);

        let depths = tree
            .leaf_depths()
            .into_iter()
            .map(|(id, depth)| {
                let payload = tree.node(id).unwrap().payload();
                (String::from_utf8(payload.to_vec()).unwrap(), depth)
            })
            .collect::<Vec<_>>();
        let expected_depths = case
            .leaf_depths
            .iter()
            .map(|leaf| (leaf.payload.clone(), leaf.depth))
            .collect::<Vec<_>>();
        assert_eq!(depths, expected_depths, "{}", comment);

        for payload in &case.payloads {
            let digest = Sha256::leaf_hash(payload.as_bytes());
            let proof = tree.generate_proof(&digest).unwrap();
            assert!(proof.verify(&expected_root), "{}: {}", comment, payload);
        }
    }
}

#[test]
fn test_update_vectors() {
    let test_vectors = load_vectors();
    for case in &test_vectors.update_cases {
        let comment = case.comment.as_deref().unwrap_or("unnamed test");
        println!("Running test case: {}", comment);

        let mut tree = Tree::<Sha256>::new();
        for payload in &case.payloads {
            tree.insert(payload.as_bytes()).unwrap();
        }
        for update in &case.updates {
            let digest = update.digest_as_bytes().unwrap();
            tree.update(update.payload.as_bytes(), &digest).unwrap();
        }

        let expected_root = hex::decode(&case.root_hash).unwrap();
        assert_eq!(tree.root_hash().unwrap(), expected_root, "{}", comment);

        let first = case.updates[0].digest_as_bytes().unwrap();
        let history = tree
            .history(&first)
            .unwrap()
            .iter()
            .map(hex::encode)
            .collect::<Vec<_>>();
        assert_eq!(history, case.history, "{}", comment);

        let last = case.updates.last().unwrap();
        for digest in std::iter::once(&case.updates[0].digest).chain(case.history.iter()) {
            let node = tree.lookup(&hex::decode(digest).unwrap()).unwrap();
            assert_eq!(node.payload(), last.payload.as_bytes(), "{}", comment);
        }
    }
}
