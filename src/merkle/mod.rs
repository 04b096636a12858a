//! Binary Merkle commitment over ordered leaf records.
//!
//! The module fixes the following layout:
//!
//! * **Leaves:** level 0 applies the hash once to every raw leaf record.
//!   Records are opaque; binding residues to metadata happens beforehand in
//!   [`leaf`] and never inside the tree builder.
//! * **Internal nodes:** `hash(left || right)`, left operand first, with no
//!   domain tag or length prefix.
//! * **Odd levels:** the last node is duplicated before folding so that every
//!   level is a uniform pairwise fold. A duplicated leaf is therefore
//!   indistinguishable from a genuine repeat in the root preimage.
//! * **Empty input:** the root is the empty byte string.
//!
//! Hash families are abstracted by [`MerkleHasher`]; [`Sha256Hasher`] is the
//! default and reproduces the reference vectors.

pub mod leaf;
mod traits;
mod tree;
mod types;

pub use traits::{Blake2sHasher, MerkleHasher, Sha256Hasher};
pub use tree::{compute_root_from_path, verify_path, MerkleTree};
pub use types::{MerkleError, MerklePathElement, MerkleRoot, NodeSide};

use crate::hash::HashFamily;

/// Computes the SHA-256 Merkle root of `leaves`.
pub fn merkle_root<I, B>(leaves: I) -> MerkleRoot
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    MerkleTree::<Sha256Hasher>::from_leaves(leaves).root()
}

/// Computes the Merkle root of `leaves` for a runtime-selected hash family.
pub fn merkle_root_with_family<I, B>(family: HashFamily, leaves: I) -> MerkleRoot
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    match family {
        HashFamily::Sha256 => MerkleTree::<Sha256Hasher>::from_leaves(leaves).root(),
        HashFamily::Blake2s => MerkleTree::<Blake2sHasher>::from_leaves(leaves).root(),
    }
}
