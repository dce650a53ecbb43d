//! Inclusion proofs.
//!
//! A proof is the digest of a leaf followed by the sibling digest at every
//! level up to the root, each paired with the side the sibling sits on.
//! Folding the digests from the leaf upward rebuilds the root digest.
//!
//! A proof can be encoded into bytes and decoded back.
use std::fmt::Debug;
use std::marker::PhantomData;

use bitvec::order::Lsb0;
use bitvec::slice::BitSlice;
use bitvec::vec::BitVec;

use crate::{node::Digest, Hasher, TreeError};

/// An inclusion proof for a leaf.
pub struct Proof<H: Hasher> {
    leaf_hash: Digest,
    hashes: Vec<Digest>,
    directions: BitVec<u8, Lsb0>,
    _phantom: PhantomData<H>,
}

impl<H: Hasher> Clone for Proof<H> {
    fn clone(&self) -> Self {
        Self::new(
            self.leaf_hash.clone(),
            self.hashes.clone(),
            self.directions.clone(),
        )
    }
}

impl<H: Hasher> PartialEq for Proof<H> {
    fn eq(&self, other: &Self) -> bool {
        self.leaf_hash == other.leaf_hash
            && self.hashes == other.hashes
            && self.directions == other.directions
    }
}

impl<H: Hasher> Eq for Proof<H> {}

impl<H: Hasher> Debug for Proof<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proof")
            .field("leaf_hash", &hex::encode(&self.leaf_hash))
            .field(
                "hashes",
                &self.hashes.iter().map(hex::encode).collect::<Vec<_>>(),
            )
            .field("directions", &self.directions)
            .finish()
    }
}

impl<H: Hasher> Proof<H> {
    /// Creates a new proof.
    /// * `leaf_hash` - digest the proof was requested for, possibly a stale one.
    /// * `hashes` - current leaf digest followed by the sibling digests, leaf to root.
    /// * `directions` - `true` where the sibling sits on the right.
    pub fn new(leaf_hash: Digest, hashes: Vec<Digest>, directions: BitVec<u8, Lsb0>) -> Self {
        Self {
            leaf_hash,
            hashes,
            directions,
            _phantom: PhantomData,
        }
    }

    /// Digest the proof was requested for.
    pub fn leaf_hash(&self) -> &[u8] {
        &self.leaf_hash
    }

    pub fn hashes(&self) -> &[Digest] {
        &self.hashes
    }

    pub fn directions(&self) -> &BitSlice<u8, Lsb0> {
        &self.directions
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    fn is_well_formed(&self) -> bool {
        !self.hashes.is_empty()
            && self.hashes.len() == self.directions.len()
            && self.directions[0]
    }

    /// Rebuilds the root digest from the proof.
    ///
    /// The leaf digest opens the fold, every following piece is combined on
    /// the side given by its direction.
    pub fn root(&self) -> Option<Digest> {
        if !self.is_well_formed() {
            return None;
        }
        let root = self.hashes[1..]
            .iter()
            .zip(self.directions[1..].iter().by_vals())
            .fold(self.hashes[0].clone(), |acc, (piece, right)| {
                if right {
                    H::combine(&acc, piece)
                } else {
                    H::combine(piece, &acc)
                }
            });
        Some(root)
    }

    /// Verify the proof against the expected root digest.
    ///
    /// Malformed proofs never verify.
    pub fn verify(&self, root_hash: &[u8]) -> bool {
        match self.root() {
            Some(root) => root == root_hash,
            None => false,
        }
    }

    /// Encodes the proof into a byte vector.
    ///
    /// Layout, integers big endian: `u32` length and bytes of the leaf hash,
    /// `u16` number of pieces, `u32` length and bytes of every piece, then the
    /// directions packed LSB first.
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::new();
        encoded.extend_from_slice(&(self.leaf_hash.len() as u32).to_be_bytes());
        encoded.extend_from_slice(&self.leaf_hash);
        encoded.extend_from_slice(&(self.hashes.len() as u16).to_be_bytes());
        for hash in self.hashes.iter() {
            encoded.extend_from_slice(&(hash.len() as u32).to_be_bytes());
            encoded.extend_from_slice(hash);
        }
        encoded.extend_from_slice(self.directions.as_raw_slice());
        encoded
    }

    /// Decodes a proof from a byte vector produced by [`Proof::encode`].
    pub fn decode(mut data: &[u8]) -> Result<Self, TreeError> {
        let leaf_len = read_u32(&mut data)? as usize;
        let leaf_hash = take(&mut data, leaf_len)?.to_vec();
        let nb_hashes = u16::from_be_bytes(take_array(&mut data)?) as usize;
        let mut hashes = Vec::with_capacity(nb_hashes);
        for _ in 0..nb_hashes {
            let len = read_u32(&mut data)? as usize;
            hashes.push(take(&mut data, len)?.to_vec());
        }
        if data.len() != nb_hashes.div_ceil(8) {
            return Err(TreeError::InvalidProofEncoding);
        }
        let mut directions = BitVec::<u8, Lsb0>::from_slice(data);
        directions.truncate(nb_hashes);
        Ok(Self::new(leaf_hash, hashes, directions))
    }
}

/// Verify `proof` against the expected root digest. A missing proof never
/// verifies.
pub fn verify_proof<H: Hasher>(proof: Option<&Proof<H>>, root_hash: &[u8]) -> bool {
    proof.is_some_and(|proof| proof.verify(root_hash))
}

fn take<'a>(data: &mut &'a [u8], len: usize) -> Result<&'a [u8], TreeError> {
    if data.len() < len {
        return Err(TreeError::InvalidProofEncoding);
    }
    let (head, tail) = data.split_at(len);
    *data = tail;
    Ok(head)
}

fn take_array<const N: usize>(data: &mut &[u8]) -> Result<[u8; N], TreeError> {
    take(data, N)?
        .try_into()
        .map_err(|_| TreeError::InvalidProofEncoding)
}

fn read_u32(data: &mut &[u8]) -> Result<u32, TreeError> {
    Ok(u32::from_be_bytes(take_array(data)?))
}
