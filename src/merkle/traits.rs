use crate::hash::{Blake2sBackend, Hash, HashBackend, HashFamily, Hasher, Sha256Backend};

/// Hash abstraction used by the Merkle commitment layer.
pub trait MerkleHasher {
    /// Backend driving both leaf and node hashing.
    type Backend: HashBackend;

    /// Hashes a raw leaf record into its level-0 node.
    fn hash_leaf(leaf: &[u8]) -> Hash {
        let mut hasher = Hasher::<Self::Backend>::with_backend();
        hasher.update(leaf);
        hasher.finalize()
    }

    /// Hashes an ordered pair of children into their parent.
    fn hash_nodes(left: &Hash, right: &Hash) -> Hash {
        let mut hasher = Hasher::<Self::Backend>::with_backend();
        hasher.update(left.as_bytes()).update(right.as_bytes());
        hasher.finalize()
    }

    fn hash_family() -> HashFamily;
}

/// SHA-256 Merkle hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl MerkleHasher for Sha256Hasher {
    type Backend = Sha256Backend;

    fn hash_family() -> HashFamily {
        HashFamily::Sha256
    }
}

/// BLAKE2s-256 Merkle hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake2sHasher;

impl MerkleHasher for Blake2sHasher {
    type Backend = Blake2sBackend;

    fn hash_family() -> HashFamily {
        HashFamily::Blake2s
    }
}
