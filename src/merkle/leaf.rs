//! Caller-side leaf preparation.
//!
//! A leaf binds one residue to its channel metadata as
//! `hash(decimal(residue) || "||" || metadata)`. The resulting digest is what
//! the tree builder receives as a raw record (and hashes once more).

use crate::hash::{Hash, HashBackend, HashFamily, Hasher};
use crate::hash::{Blake2sBackend, Sha256Backend};

/// Separator placed between the residue and its metadata.
pub const LEAF_SEPARATOR: &[u8] = b"||";

/// Binds a residue to metadata with SHA-256.
pub fn bind_residue(residue: u64, metadata: &[u8]) -> Hash {
    bind_residue_with::<Sha256Backend>(residue, metadata)
}

/// Binds a residue to metadata with an explicit backend.
pub fn bind_residue_with<B: HashBackend>(residue: u64, metadata: &[u8]) -> Hash {
    let mut hasher = Hasher::<B>::with_backend();
    hasher
        .update(residue.to_string().as_bytes())
        .update(LEAF_SEPARATOR)
        .update(metadata);
    hasher.finalize()
}

/// Prepares one leaf per `(residue, metadata)` pair for a runtime-selected family.
pub fn prepare_leaves<M>(family: HashFamily, residues: &[u64], metadata: &[M]) -> Vec<Hash>
where
    M: AsRef<[u8]>,
{
    residues
        .iter()
        .zip(metadata)
        .map(|(residue, meta)| match family {
            HashFamily::Sha256 => bind_residue_with::<Sha256Backend>(*residue, meta.as_ref()),
            HashFamily::Blake2s => bind_residue_with::<Blake2sBackend>(*residue, meta.as_ref()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash;

    #[test]
    fn residue_binding_matches_reference() {
        assert_eq!(
            bind_residue(56, b"meta1").to_hex(),
            "b4ff51ad3543e4a5328a0fce28823fe19f4a3e6263163a1fccbde1401dc7c7ea"
        );
        assert_eq!(bind_residue(101, b"meta2"), hash(b"101||meta2"));
    }

    #[test]
    fn prepare_leaves_pairs_in_order() {
        let metadata = [b"meta1", b"meta2", b"meta3"];
        let leaves = prepare_leaves(HashFamily::Sha256, &[56, 101, 74], &metadata);
        assert_eq!(leaves.len(), 3);
        assert_eq!(
            leaves[2].to_hex(),
            "99101213ad212dcf1a521a4e023e305579f782f93d2df9b48b43ab685e07d096"
        );
    }
}
