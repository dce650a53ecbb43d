use serde::{Deserialize, Serialize};

/// All test vectors of a fixture file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestVectors {
    pub insertion_cases: Vec<InsertionCase>,
    pub update_cases: Vec<UpdateCase>,
}

/// Payloads inserted in order and the resulting tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertionCase {
    pub comment: Option<String>,
    pub payloads: Vec<String>,
    pub root_hash: String,
    pub leaf_depths: Vec<TestLeafDepth>,
}

/// A leaf and its depth, listed in balancer order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestLeafDepth {
    pub payload: String,
    pub depth: usize,
}

/// Payloads inserted in order, then updated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateCase {
    pub comment: Option<String>,
    pub payloads: Vec<String>,
    pub updates: Vec<TestUpdate>,
    pub root_hash: String,
    /// History of the lineage of the first updated digest
    pub history: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestUpdate {
    pub payload: String,
    pub digest: String,
}

impl TestUpdate {
    /// Get the digest as bytes
    pub fn digest_as_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.digest)
    }
}
