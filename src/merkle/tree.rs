use std::marker::PhantomData;

use tracing::debug;

use crate::hash::Hash;

use super::traits::MerkleHasher;
use super::types::{MerkleError, MerklePathElement, MerkleRoot, NodeSide};

/// Merkle tree retaining every hashed level for subsequent openings.
///
/// `levels[0]` holds the leaf digests, the last level holds the root. Levels
/// are stored before duplication, so an odd level keeps its true width.
#[derive(Debug, Clone)]
pub struct MerkleTree<H: MerkleHasher> {
    levels: Vec<Vec<Hash>>,
    marker: PhantomData<H>,
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Builds a tree from raw leaf records.
    pub fn from_leaves<I, B>(leaves: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let hashed: Vec<Hash> = leaves
            .into_iter()
            .map(|leaf| H::hash_leaf(leaf.as_ref()))
            .collect();
        let levels = fold_levels::<H>(hashed);
        debug!(
            hash = %H::hash_family(),
            leaves = levels.first().map_or(0, Vec::len),
            depth = levels.len().saturating_sub(1),
            "built merkle tree"
        );
        Self {
            levels,
            marker: PhantomData,
        }
    }

    /// Returns the root, or the empty sentinel when no leaves were supplied.
    pub fn root(&self) -> MerkleRoot {
        self.levels
            .last()
            .and_then(|level| level.first().copied())
            .map(MerkleRoot::from)
            .unwrap_or_else(MerkleRoot::empty)
    }

    /// Number of leaves committed by the tree.
    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of pairwise folds between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Leaf digests (level 0).
    pub fn leaf_digests(&self) -> &[Hash] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Generates an authentication path for the leaf at `index`.
    pub fn open(&self, index: usize) -> Result<Vec<MerklePathElement>, MerkleError> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(MerkleError::IndexOutOfRange { index, leaf_count });
        }

        let mut path = Vec::with_capacity(self.depth());
        let mut current = index;
        for nodes in &self.levels[..self.depth()] {
            let sibling_index = current ^ 1;
            // Missing right sibling: the node pairs with its own duplicate.
            let sibling = nodes.get(sibling_index).unwrap_or(&nodes[current]);
            path.push(MerklePathElement {
                side: NodeSide::of_index(current),
                sibling: *sibling,
            });
            current /= 2;
        }
        Ok(path)
    }
}

/// Folds leaf digests bottom-up and returns every level, leaves first.
///
/// An empty input yields no levels at all.
pub(crate) fn fold_levels<H: MerkleHasher>(leaf_digests: Vec<Hash>) -> Vec<Vec<Hash>> {
    if leaf_digests.is_empty() {
        return Vec::new();
    }

    let mut levels = vec![leaf_digests];
    while let Some(current) = levels.last().filter(|level| level.len() > 1) {
        let pairs = current.chunks_exact(2);
        let lone = pairs.remainder().first().map(|node| H::hash_nodes(node, node));
        let next: Vec<Hash> = pairs
            .map(|pair| H::hash_nodes(&pair[0], &pair[1]))
            .chain(lone)
            .collect();
        levels.push(next);
    }
    levels
}

/// Recomputes the root from a leaf record and its authentication path.
///
/// * `leaf`: raw leaf record (hashed once here).
/// * `index`: position of the leaf (0-based).
/// * `leaf_count`: total number of committed leaves.
/// * `path`: authentication path, leaf to root.
pub fn compute_root_from_path<H: MerkleHasher>(
    leaf: &[u8],
    index: usize,
    leaf_count: usize,
    path: &[MerklePathElement],
) -> Result<MerkleRoot, MerkleError> {
    if index >= leaf_count {
        return Err(MerkleError::IndexOutOfRange { index, leaf_count });
    }
    let expected = depth_for(leaf_count);
    if path.len() != expected {
        return Err(MerkleError::PathLengthMismatch {
            expected,
            got: path.len(),
        });
    }

    let mut node = H::hash_leaf(leaf);
    let mut current = index;
    let mut width = leaf_count;
    for (level, element) in path.iter().enumerate() {
        if element.side != NodeSide::of_index(current) {
            return Err(MerkleError::SideMismatch { level });
        }
        node = match element.side {
            NodeSide::Left => {
                if current + 1 >= width && element.sibling != node {
                    return Err(MerkleError::DuplicationMismatch { level });
                }
                H::hash_nodes(&node, &element.sibling)
            }
            NodeSide::Right => H::hash_nodes(&element.sibling, &node),
        };
        current /= 2;
        width = width.div_ceil(2);
    }
    Ok(MerkleRoot::from(node))
}

/// Verifies an authentication path against an expected root.
pub fn verify_path<H: MerkleHasher>(
    leaf: &[u8],
    index: usize,
    leaf_count: usize,
    path: &[MerklePathElement],
    expected_root: &MerkleRoot,
) -> Result<(), MerkleError> {
    let computed = compute_root_from_path::<H>(leaf, index, leaf_count, path)?;
    if &computed != expected_root {
        return Err(MerkleError::RootMismatch);
    }
    Ok(())
}

fn depth_for(leaf_count: usize) -> usize {
    let mut width = leaf_count;
    let mut depth = 0;
    while width > 1 {
        width = width.div_ceil(2);
        depth += 1;
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash;
    use crate::merkle::Sha256Hasher;

    type Tree = MerkleTree<Sha256Hasher>;

    fn pair(left: Hash, right: Hash) -> Hash {
        let mut bytes = left.as_bytes().to_vec();
        bytes.extend_from_slice(right.as_bytes());
        hash(&bytes)
    }

    #[test]
    fn empty_tree_root_is_sentinel() {
        let tree = Tree::from_leaves(Vec::<Vec<u8>>::new());
        assert_eq!(tree.leaf_count(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.root().is_empty());
        assert_eq!(tree.root().to_hex(), "");
    }

    #[test]
    fn single_leaf_root_is_leaf_hash() {
        let tree = Tree::from_leaves([b"x"]);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.root(), MerkleRoot::from(hash(b"x")));
    }

    #[test]
    fn odd_level_duplicates_last_node() {
        let (a, b, c) = (hash(b"a"), hash(b"b"), hash(b"c"));
        let expected = pair(pair(a, b), pair(c, c));
        let tree = Tree::from_leaves([b"a", b"b", b"c"]);
        assert_eq!(tree.root(), MerkleRoot::from(expected));
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn five_leaves_duplicate_on_two_levels() {
        let leaves: Vec<Hash> = [b"1", b"2", b"3", b"4", b"5"]
            .iter()
            .map(|leaf| hash(*leaf))
            .collect();
        let left = pair(pair(leaves[0], leaves[1]), pair(leaves[2], leaves[3]));
        let right_inner = pair(leaves[4], leaves[4]);
        let right = pair(right_inner, right_inner);
        let tree = Tree::from_leaves([b"1", b"2", b"3", b"4", b"5"]);
        assert_eq!(tree.root(), MerkleRoot::from(pair(left, right)));
    }

    #[test]
    fn fold_levels_pairs_exactly_and_duplicates_tail() {
        let leaves: Vec<Hash> = (0u8..3).map(|i| hash(&[i])).collect();
        let levels = fold_levels::<Sha256Hasher>(leaves.clone());
        assert_eq!(levels.len(), 3);
        assert_eq!(
            levels[1],
            vec![pair(leaves[0], leaves[1]), pair(leaves[2], leaves[2])]
        );
        assert_eq!(levels[2], vec![pair(levels[1][0], levels[1][1])]);
        assert!(fold_levels::<Sha256Hasher>(Vec::new()).is_empty());
    }

    #[test]
    fn build_path_verify_roundtrip_ok() -> Result<(), MerkleError> {
        let leaves: Vec<Vec<u8>> = (0u8..7).map(|i| vec![i; (i + 1) as usize]).collect();
        let tree = Tree::from_leaves(&leaves);
        let root = tree.root();
        for (index, leaf) in leaves.iter().enumerate() {
            let path = tree.open(index)?;
            verify_path::<Sha256Hasher>(leaf, index, tree.leaf_count(), &path, &root)?;
        }
        Ok(())
    }

    #[test]
    fn open_rejects_out_of_range_index() {
        let tree = Tree::from_leaves([b"a", b"b"]);
        let err = tree.open(2).unwrap_err();
        assert_eq!(
            err,
            MerkleError::IndexOutOfRange {
                index: 2,
                leaf_count: 2
            }
        );
    }

    #[test]
    fn verify_fails_on_tampered_sibling() -> Result<(), MerkleError> {
        let leaves = [b"a", b"b", b"c", b"d"];
        let tree = Tree::from_leaves(leaves);
        let mut path = tree.open(1)?;
        let mut bytes = path[1].sibling.into_bytes();
        bytes[0] ^= 0x01;
        path[1].sibling = Hash::from_bytes(bytes);
        let err = verify_path::<Sha256Hasher>(b"b", 1, 4, &path, &tree.root()).unwrap_err();
        assert_eq!(err, MerkleError::RootMismatch);
        Ok(())
    }

    #[test]
    fn verify_fails_on_wrong_side() -> Result<(), MerkleError> {
        let tree = Tree::from_leaves([b"a", b"b"]);
        let mut path = tree.open(0)?;
        path[0].side = NodeSide::Right;
        let err = compute_root_from_path::<Sha256Hasher>(b"a", 0, 2, &path).unwrap_err();
        assert_eq!(err, MerkleError::SideMismatch { level: 0 });
        Ok(())
    }

    #[test]
    fn verify_fails_on_bad_duplicate() -> Result<(), MerkleError> {
        let tree = Tree::from_leaves([b"a", b"b", b"c"]);
        let mut path = tree.open(2)?;
        assert_eq!(path[0].sibling, hash(b"c"));
        path[0].sibling = hash(b"d");
        let err = compute_root_from_path::<Sha256Hasher>(b"c", 2, 3, &path).unwrap_err();
        assert_eq!(err, MerkleError::DuplicationMismatch { level: 0 });
        Ok(())
    }

    #[test]
    fn verify_fails_on_truncated_path() -> Result<(), MerkleError> {
        let tree = Tree::from_leaves([b"a", b"b", b"c"]);
        let mut path = tree.open(0)?;
        path.pop();
        let err = compute_root_from_path::<Sha256Hasher>(b"a", 0, 3, &path).unwrap_err();
        assert_eq!(
            err,
            MerkleError::PathLengthMismatch {
                expected: 2,
                got: 1
            }
        );
        Ok(())
    }
}
