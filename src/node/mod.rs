mod hasher;

use std::fmt::Display;

pub use hasher::{Digest, Hasher, LEAF_DIGEST_SIZE};

use crate::TreeError;

/// Payload held by every branch node in place of real content.
pub const BRANCH_SENTINEL: &[u8] = b"X";

/// Handle of a node inside its tree.
///
/// Handles are only meaningful for the tree that issued them. Nodes are never
/// removed so a handle stays valid for the lifetime of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in the tree arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A vertex of the tree.
///
/// A leaf has no children and holds real payload, a branch has exactly two
/// children and holds [`BRANCH_SENTINEL`]. The parent link is only used to walk
/// up the tree, children are owned through the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    children: Option<(NodeId, NodeId)>,
    parent: Option<NodeId>,
    payload: Vec<u8>,
    digest: Digest,
}

impl Node {
    /// Creates a detached leaf. Fails if `digest` is empty.
    pub(crate) fn new_leaf(payload: Vec<u8>, digest: Digest) -> Result<Self, TreeError> {
        if digest.is_empty() {
            return Err(TreeError::MissingDigest);
        }
        Ok(Self {
            children: None,
            parent: None,
            payload,
            digest,
        })
    }

    /// Creates a branch over `left` and `right`. Fails if `digest` is empty.
    pub(crate) fn new_branch(
        left: NodeId,
        right: NodeId,
        parent: Option<NodeId>,
        digest: Digest,
    ) -> Result<Self, TreeError> {
        if digest.is_empty() {
            return Err(TreeError::MissingDigest);
        }
        Ok(Self {
            children: Some((left, right)),
            parent,
            payload: BRANCH_SENTINEL.to_vec(),
            digest,
        })
    }

    /// Returns the digest of the node. NO HASHING IS DONE HERE.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Returns the payload of a leaf, or [`BRANCH_SENTINEL`] for a branch.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the left and right children of a branch.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, right)| right)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    pub(crate) fn set_digest(&mut self, digest: Digest) {
        self.digest = digest;
    }

    /// Replaces the content of a leaf in place.
    pub(crate) fn set_content(&mut self, payload: Vec<u8>, digest: Digest) {
        self.payload = payload;
        self.digest = digest;
    }

    /// Points the child slot currently holding `old` to `new`.
    pub(crate) fn replace_child(&mut self, old: NodeId, new: NodeId) {
        if let Some((left, right)) = self.children.as_mut() {
            if *left == old {
                *left = new;
            } else if *right == old {
                *right = new;
            }
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_leaf() {
            write!(
                f,
                "Leaf {{ hash: {}, payload: {:?} }}",
                hex::encode(self.digest()),
                self.payload()
            )
        } else {
            write!(f, "Branch {{ hash: {} }}", hex::encode(self.digest()))
        }
    }
}
