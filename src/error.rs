//! Error types for the stale merkle tree implementation

use thiserror::Error;

/// Error type for tree operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TreeError {
    /// The digest already resolves to a node, either directly or through history
    #[error("Hash already exists. Use update() to update an existing hash")]
    DuplicateHash,
    /// The digest does not resolve to any node
    #[error("Hash not found in tree")]
    NotFound,
    /// The tree has no root
    #[error("Tree is empty")]
    EmptyTree,
    /// A node was built without a digest
    #[error("Hash data missing")]
    MissingDigest,
    /// The digest is already part of the lineage history
    #[error("Duplicate hash update insert detected")]
    DuplicateHistoryInsert,
    /// Encoded proof bytes are truncated or inconsistent
    #[error("Invalid proof encoding")]
    InvalidProofEncoding,
}
