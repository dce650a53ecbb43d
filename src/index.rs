//! Digest index mapping every digest a leaf has ever held to that leaf.
//!
//! Each inserted leaf opens a lineage keyed by its original digest. Updates
//! never create new keys: the superseding digest is appended to the history of
//! the lineage, oldest first. Any digest of the lineage, original or
//! superseding, resolves to the current state of the leaf. An original key
//! always resolves to its own lineage, even once it appears in another
//! lineage's history.

use std::collections::HashMap;

use log::warn;

use crate::{node::Digest, NodeId, TreeError};

/// A lineage: the leaf it tracks and the digests that superseded the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    node: NodeId,
    history: Vec<Digest>,
}

impl Record {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Digests that superseded the original key, oldest first.
    pub fn history(&self) -> &[Digest] {
        &self.history
    }
}

#[derive(Debug, Clone, Default)]
pub struct DigestIndex {
    records: HashMap<Digest, Record>,
    // superseding digest -> original key of its lineage
    superseded: HashMap<Digest, Digest>,
}

impl DigestIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::with_capacity(capacity),
            superseded: HashMap::new(),
        }
    }

    /// Number of lineages.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `digest` is an original key or appears in some history.
    pub fn contains(&self, digest: &[u8]) -> bool {
        self.resolve_key(digest).is_some()
    }

    /// Original key of the lineage `digest` belongs to.
    pub fn resolve_key(&self, digest: &[u8]) -> Option<&[u8]> {
        match self.records.get_key_value(digest) {
            Some((key, _)) => Some(key.as_slice()),
            None => self.superseded.get(digest).map(Vec::as_slice),
        }
    }

    /// Record of the lineage `digest` belongs to.
    pub fn resolve(&self, digest: &[u8]) -> Option<&Record> {
        self.resolve_key(digest).and_then(|key| self.records.get(key))
    }

    /// Node currently identified by the lineage of `digest`.
    pub fn lookup(&self, digest: &[u8]) -> Option<NodeId> {
        self.resolve(digest).map(Record::node)
    }

    /// Opens a new lineage for `node`.
    pub(crate) fn register(&mut self, digest: Digest, node: NodeId) -> Result<(), TreeError> {
        if self.contains(&digest) {
            return Err(TreeError::DuplicateHash);
        }
        self.records.insert(
            digest,
            Record {
                node,
                history: Vec::new(),
            },
        );
        Ok(())
    }

    /// Appends `new_digest` to the history of the lineage `digest` resolves to
    /// and returns the node of that lineage.
    ///
    /// `new_digest` may be the original key of any lineage: original keys
    /// take precedence when resolving, so that lineage keeps owning it. A
    /// digest sits in at most one history; recording it twice fails with
    /// [`TreeError::DuplicateHistoryInsert`]. Nothing is recorded when this
    /// fails.
    pub(crate) fn supersede(
        &mut self,
        digest: &[u8],
        new_digest: Digest,
    ) -> Result<NodeId, TreeError> {
        let key = self.resolve_key(digest).ok_or(TreeError::NotFound)?.to_vec();
        if let Some(owner) = self.superseded.get(&new_digest) {
            warn!(
                "digest {} is already part of the history of {}",
                hex::encode(&new_digest),
                hex::encode(owner)
            );
            return Err(TreeError::DuplicateHistoryInsert);
        }

        let record = self.records.get_mut(&key).ok_or(TreeError::NotFound)?;
        record.history.push(new_digest.clone());
        let node = record.node;
        self.superseded.insert(new_digest, key);
        Ok(node)
    }
}
