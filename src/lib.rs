//! Self-balancing merkle tree with content updates and stale digest lookup
//!
//! This crate provides an incrementally built binary hash tree tracking content
//! blocks by digest.
//!
//! The tree supports:
//! - Insertion next to the leftmost shallowest leaf, keeping leaf depths within one
//! - In-place content updates, with lookups by any digest a leaf ever held
//! - Inclusion proof generation and verification
//! - Pluggable hashing through the `Hasher` trait

mod error;
mod index;
mod node;
mod proof;
mod tree;

pub use error::TreeError;
pub use index::{DigestIndex, Record};
pub use node::{Digest, Hasher, Node, NodeId, BRANCH_SENTINEL, LEAF_DIGEST_SIZE};
pub use proof::{verify_proof, Proof};
pub use tree::{Tree, TreeEntry, Walk};

#[cfg(test)]
mod tests;
