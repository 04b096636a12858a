use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::Hash;

/// Root of a Merkle commitment.
///
/// Holds either a full digest or the empty byte string committed to by an
/// empty leaf sequence.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MerkleRoot {
    bytes: Vec<u8>,
}

impl MerkleRoot {
    /// The sentinel root of an empty leaf sequence.
    pub fn empty() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Returns the raw root bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the root and returns the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Whether this is the empty-input sentinel.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hexadecimal rendering (empty string for the sentinel).
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl From<Hash> for MerkleRoot {
    fn from(hash: Hash) -> Self {
        Self {
            bytes: hash.as_bytes().to_vec(),
        }
    }
}

impl AsRef<[u8]> for MerkleRoot {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for MerkleRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MerkleRoot(0x{})", self.to_hex())
    }
}

/// Position of a node within its parent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeSide {
    Left,
    Right,
}

impl NodeSide {
    pub(crate) fn of_index(index: usize) -> Self {
        if index % 2 == 0 {
            NodeSide::Left
        } else {
            NodeSide::Right
        }
    }
}

/// Path element: the caller's side within the parent plus its sibling digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerklePathElement {
    pub side: NodeSide,
    pub sibling: Hash,
}

/// Errors reported while opening or verifying authentication paths.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MerkleError {
    /// The requested leaf index is outside the committed leaf range.
    #[error("leaf index {index} out of range for {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },
    /// The path does not have one element per folded level.
    #[error("authentication path has {got} elements, expected {expected}")]
    PathLengthMismatch { expected: usize, got: usize },
    /// A path element claims the wrong side for the node position.
    #[error("path element at level {level} has the wrong side")]
    SideMismatch { level: usize },
    /// The sibling of a duplicated trailing node is not the node itself.
    #[error("path element at level {level} breaks odd-node duplication")]
    DuplicationMismatch { level: usize },
    /// The recomputed root differs from the expected one.
    #[error("recomputed root does not match the commitment")]
    RootMismatch,
}
