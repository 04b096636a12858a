use proptest::prelude::*;
use sda_pipeline::hash::{hash, HashFamily, DIGEST_SIZE};
use sda_pipeline::merkle::{
    compute_root_from_path, merkle_root, merkle_root_with_family, verify_path, Blake2sHasher,
    MerkleError, MerkleRoot, MerkleTree, Sha256Hasher,
};

fn hex_to_root(hex: &str) -> MerkleRoot {
    let decoded = hex::decode(hex).expect("valid hex digest");
    assert_eq!(decoded.len(), DIGEST_SIZE);
    let mut bytes = [0u8; DIGEST_SIZE];
    bytes.copy_from_slice(&decoded);
    MerkleRoot::from(sda_pipeline::hash::Hash::from_bytes(bytes))
}

#[test]
fn empty_sequence_yields_empty_sentinel() {
    let root = merkle_root(Vec::<Vec<u8>>::new());
    assert!(root.is_empty());
    assert_eq!(root, MerkleRoot::empty());
    assert_eq!(root.as_bytes(), b"");
}

#[test]
fn singleton_is_hash_of_leaf() {
    let root = merkle_root([b"a"]);
    assert_eq!(root, MerkleRoot::from(hash(b"a")));
    assert_eq!(
        root,
        hex_to_root("ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb")
    );
}

#[test]
fn two_leaf_root_matches_reference() {
    assert_eq!(
        merkle_root([b"a", b"b"]),
        hex_to_root("e5a01fee14e0ed5c48714f22180f25ad8365b53f9779f79dc4a3d7e93963f94a")
    );
}

#[test]
fn three_leaf_root_matches_reference() {
    assert_eq!(
        merkle_root([b"a", b"b", b"c"]),
        hex_to_root("d31a37ef6ac14a2db1470c4316beb5592e6afd4465022339adafda76a18ffabe")
    );
    assert_eq!(
        merkle_root([b"c", b"b", b"a"]),
        hex_to_root("ca4d6f43563a356ecda2e7aa848c173a1b76209fa09c7dab27b6d4b1e27332e1")
    );
}

#[test]
fn duplicated_tail_is_indistinguishable_from_repeat() {
    assert_eq!(
        merkle_root([b"a", b"b", b"c"]),
        merkle_root([b"a", b"b", b"c", b"c"])
    );
}

#[test]
fn family_selection_changes_root() {
    let leaves = [b"a", b"b", b"c"];
    assert_eq!(
        merkle_root_with_family(HashFamily::Sha256, leaves),
        merkle_root(leaves)
    );
    assert_ne!(
        merkle_root_with_family(HashFamily::Blake2s, leaves),
        merkle_root(leaves)
    );
}

#[test]
fn blake2s_paths_verify() -> Result<(), MerkleError> {
    let leaves: Vec<String> = (0..6).map(|i| format!("leaf-{i}")).collect();
    let tree = MerkleTree::<Blake2sHasher>::from_leaves(&leaves);
    for (index, leaf) in leaves.iter().enumerate() {
        let path = tree.open(index)?;
        verify_path::<Blake2sHasher>(leaf.as_bytes(), index, 6, &path, &tree.root())?;
    }
    Ok(())
}

#[test]
fn wrong_leaf_fails_verification() -> Result<(), MerkleError> {
    let tree = MerkleTree::<Sha256Hasher>::from_leaves([b"a", b"b", b"c"]);
    let path = tree.open(0)?;
    let err = verify_path::<Sha256Hasher>(b"z", 0, 3, &path, &tree.root()).unwrap_err();
    assert_eq!(err, MerkleError::RootMismatch);
    Ok(())
}

proptest! {
    #[test]
    fn root_is_deterministic(leaves in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..16), 0..24)) {
        prop_assert_eq!(merkle_root(&leaves), merkle_root(&leaves));
    }

    #[test]
    fn reversing_distinct_sequence_changes_root(leaves in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..8), 2..24)) {
        let mut reversed = leaves.clone();
        reversed.reverse();
        prop_assume!(reversed != leaves);
        prop_assert_ne!(merkle_root(&leaves), merkle_root(&reversed));
    }

    #[test]
    fn every_leaf_path_recomputes_root(leaves in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..8), 1..40)) {
        let tree = MerkleTree::<Sha256Hasher>::from_leaves(&leaves);
        let root = tree.root();
        for (index, leaf) in leaves.iter().enumerate() {
            let path = tree.open(index).unwrap();
            prop_assert_eq!(path.len(), tree.depth());
            let computed = compute_root_from_path::<Sha256Hasher>(leaf, index, leaves.len(), &path).unwrap();
            prop_assert_eq!(&computed, &root);
        }
    }
}
