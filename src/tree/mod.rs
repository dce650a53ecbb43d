//! Self-balancing merkle tree with in-place content updates

mod balancer;
mod walk;

use std::fmt::Debug;
use std::marker::PhantomData;

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use log::{debug, trace};
use sha2::Sha256;

pub use walk::{TreeEntry, Walk};

use crate::{
    index::DigestIndex,
    node::{Digest, Hasher, Node, NodeId},
    Proof, TreeError,
};

/// Merkle tree tracking content blocks by digest.
///
/// New leaves always land next to the leftmost shallowest leaf so leaf depths
/// never differ by more than one. Leaves can be updated in place and stay
/// reachable through every digest they ever held.
///
/// * `H` - Hasher used for leaf digests and to combine child digests.
pub struct Tree<H: Hasher = Sha256> {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    index: DigestIndex,
    _phantom: PhantomData<H>,
}

impl<H: Hasher> Default for Tree<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hasher> Clone for Tree<H> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            index: self.index.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<H: Hasher> Debug for Tree<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root_hash().map(hex::encode))
            .field("leaves", &self.len())
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl<H: Hasher> Tree<H> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            index: DigestIndex::new(),
            _phantom: PhantomData,
        }
    }

    /// Creates an empty tree with room for `leaves` leaves.
    pub fn with_capacity(leaves: usize) -> Self {
        Self {
            nodes: Vec::with_capacity((2 * leaves).saturating_sub(1)),
            root: None,
            index: DigestIndex::with_capacity(leaves),
            _phantom: PhantomData,
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.map(|root| &self.nodes[root.index()])
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// Digest of the root node. NO HASHING IS DONE HERE.
    pub fn root_hash(&self) -> Option<&[u8]> {
        self.root().map(Node::digest)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn index(&self) -> &DigestIndex {
        &self.index
    }

    /// Whether `digest` resolves to a leaf, as its original digest or through
    /// its update history.
    pub fn contains(&self, digest: &[u8]) -> bool {
        self.index.contains(digest)
    }

    /// Digests that superseded the lineage `digest` belongs to, oldest first.
    pub fn history(&self, digest: &[u8]) -> Option<&[Digest]> {
        self.index.resolve(digest).map(|record| record.history())
    }

    /// Every leaf with its depth, in left-biased pre-order.
    pub fn leaf_depths(&self) -> Vec<(NodeId, usize)> {
        match self.root {
            Some(root) => balancer::leaf_depths(&self.nodes, root),
            None => Vec::new(),
        }
    }

    /// Read-only traversal in render order, see [`Walk`].
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.nodes, self.root)
    }

    /// Recomputes the digest of `start` and of every ancestor up to the root.
    fn repair_hashes(&mut self, start: Option<NodeId>) {
        let mut current = start;
        while let Some(id) = current {
            let (children, parent) = {
                let node = &self.nodes[id.index()];
                (node.children(), node.parent())
            };
            if let Some((left, right)) = children {
                let digest = H::combine(
                    self.nodes[left.index()].digest(),
                    self.nodes[right.index()].digest(),
                );
                trace!("repaired {:?} -> {}", id, hex::encode(&digest));
                self.nodes[id.index()].set_digest(digest);
            }
            current = parent;
        }
    }

    fn next_ids(&self) -> (NodeId, NodeId) {
        let len = self.nodes.len();
        (NodeId::new(len), NodeId::new(len + 1))
    }

    /// Insert a new leaf holding `payload` and return its digest.
    ///
    /// Fails with [`TreeError::DuplicateHash`] if the digest of `payload`
    /// already resolves, even only through update history. The tree is left
    /// untouched on failure.
    pub fn insert(&mut self, payload: impl Into<Vec<u8>>) -> Result<Digest, TreeError> {
        let payload = payload.into();
        let digest = H::leaf_hash(&payload);
        if self.index.contains(&digest) {
            return Err(TreeError::DuplicateHash);
        }
        let leaf = Node::new_leaf(payload, digest.clone())?;

        let leaf_id = match self.root {
            None => {
                let (leaf_id, _) = self.next_ids();
                self.nodes.push(leaf);
                self.root = Some(leaf_id);
                leaf_id
            }
            Some(root) if self.nodes[root.index()].is_leaf() => {
                self.insert_beside_root(root, leaf)?
            }
            Some(root) => self.insert_at_shallowest(root, leaf)?,
        };
        self.index.register(digest.clone(), leaf_id)?;
        debug!("inserted leaf {} as {:?}", hex::encode(&digest), leaf_id);
        Ok(digest)
    }

    /// The old root becomes the left child of a new root branch, the new leaf
    /// its right child.
    fn insert_beside_root(&mut self, root: NodeId, mut leaf: Node) -> Result<NodeId, TreeError> {
        let (leaf_id, branch_id) = self.next_ids();
        let digest = H::combine(self.nodes[root.index()].digest(), leaf.digest());
        let branch = Node::new_branch(root, leaf_id, None, digest)?;

        leaf.set_parent(branch_id);
        self.nodes.push(leaf);
        self.nodes.push(branch);
        self.nodes[root.index()].set_parent(branch_id);
        self.root = Some(branch_id);

        self.repair_hashes(Some(branch_id));
        Ok(leaf_id)
    }

    /// The target leaf is replaced by a branch holding the new leaf on the
    /// left and the target on the right.
    fn insert_at_shallowest(&mut self, root: NodeId, mut leaf: Node) -> Result<NodeId, TreeError> {
        let depths = balancer::leaf_depths(&self.nodes, root);
        let target = balancer::insertion_target(&depths).ok_or(TreeError::EmptyTree)?;
        let Some(parent) = self.nodes[target.index()].parent() else {
            unreachable!("Leaves below a branch root always have a parent.");
        };

        let (leaf_id, branch_id) = self.next_ids();
        let digest = H::combine(leaf.digest(), self.nodes[target.index()].digest());
        let branch = Node::new_branch(leaf_id, target, Some(parent), digest)?;

        leaf.set_parent(branch_id);
        self.nodes.push(leaf);
        self.nodes.push(branch);
        self.nodes[parent.index()].replace_child(target, branch_id);
        self.nodes[target.index()].set_parent(branch_id);

        self.repair_hashes(Some(branch_id));
        Ok(leaf_id)
    }

    /// Replace the content of the leaf `digest` resolves to and return its new
    /// digest.
    ///
    /// `digest` can be any digest the leaf ever held. The new digest is
    /// appended to the history of the leaf's lineage so every prior digest
    /// keeps resolving to the updated leaf. Fails with
    /// [`TreeError::DuplicateHistoryInsert`] if the new digest is already in
    /// some history, leaving the tree untouched.
    pub fn update(
        &mut self,
        payload: impl Into<Vec<u8>>,
        digest: &[u8],
    ) -> Result<Digest, TreeError> {
        if !self.index.contains(digest) {
            return Err(TreeError::NotFound);
        }
        let payload = payload.into();
        let new_digest = H::leaf_hash(&payload);
        if new_digest.is_empty() {
            return Err(TreeError::MissingDigest);
        }

        let id = self.index.supersede(digest, new_digest.clone())?;
        let parent = {
            let node = &mut self.nodes[id.index()];
            node.set_content(payload, new_digest.clone());
            node.parent()
        };
        self.repair_hashes(parent);
        debug!(
            "updated leaf {:?}: {} -> {}",
            id,
            hex::encode(digest),
            hex::encode(&new_digest)
        );
        Ok(new_digest)
    }

    /// Get the leaf `digest` resolves to, in its current state.
    pub fn lookup(&self, digest: &[u8]) -> Result<&Node, TreeError> {
        self.index
            .lookup(digest)
            .map(|id| &self.nodes[id.index()])
            .ok_or(TreeError::NotFound)
    }

    /// Build an inclusion proof for the leaf `digest` resolves to.
    ///
    /// The proof starts with the current digest of the leaf, followed by the
    /// sibling digest at every level up to the root. A `true` direction means
    /// the sibling sits on the right.
    pub fn generate_proof(&self, digest: &[u8]) -> Result<Proof<H>, TreeError> {
        if self.root.is_none() {
            return Err(TreeError::EmptyTree);
        }
        let leaf = self.index.lookup(digest).ok_or(TreeError::NotFound)?;

        let mut hashes = vec![self.nodes[leaf.index()].digest().to_vec()];
        let mut directions = BitVec::<u8, Lsb0>::new();
        directions.push(true);

        let mut current = leaf;
        while let Some(parent) = self.nodes[current.index()].parent() {
            let Some((left, right)) = self.nodes[parent.index()].children() else {
                unreachable!("A parent is always a branch.");
            };
            if left == current {
                hashes.push(self.nodes[right.index()].digest().to_vec());
                directions.push(true);
            } else {
                hashes.push(self.nodes[left.index()].digest().to_vec());
                directions.push(false);
            }
            current = parent;
        }
        Ok(Proof::new(digest.to_vec(), hashes, directions))
    }
}
