use sha2::{Digest as _, Sha256};

/// Byte digest identifying a node.
///
/// Leaf digests have a fixed width, branch digests produced by the default
/// [`Hasher::combine`] grow with the size of the subtree.
pub type Digest = Vec<u8>;

/// Width in bytes of the leaf digests produced by the [`Sha256`] hasher.
pub const LEAF_DIGEST_SIZE: usize = 16;

/// Hash primitives required to build the tree.
///
/// `leaf_hash` digests leaf payloads and `combine` derives a branch digest from
/// the digests of its two children. The default `combine` concatenates both
/// digests without hashing them again.
pub trait Hasher {
    fn leaf_hash(payload: &[u8]) -> Digest;

    fn combine(left: &[u8], right: &[u8]) -> Digest {
        [left, right].concat()
    }
}

/// SHA-256 truncated to [`LEAF_DIGEST_SIZE`] bytes.
impl Hasher for Sha256 {
    fn leaf_hash(payload: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(payload);
        hasher.finalize()[..LEAF_DIGEST_SIZE].to_vec()
    }
}
