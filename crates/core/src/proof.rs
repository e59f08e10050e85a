//! Inclusion proof value types.

use serde::{Deserialize, Serialize};

/// An inclusion proof for one leaf.
///
/// Contains the sibling at each level from the leaf layer up to (excluding)
/// the root, and the direction of the path node at that level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof<E> {
    /// Sibling values from the leaf level upwards.
    pub path_elements: Vec<E>,

    /// Direction at each level: true = path node is the right child, so the
    /// sibling is hashed as the left operand.
    pub path_indices: Vec<bool>,
}

impl<E> MerkleProof<E> {
    pub fn new(path_elements: Vec<E>, path_indices: Vec<bool>) -> Self {
        Self {
            path_elements,
            path_indices,
        }
    }

    /// Number of hashing levels the proof spans.
    pub fn depth(&self) -> usize {
        self.path_elements.len()
    }

    /// Leaf position encoded by the direction bits (bit k = level k).
    ///
    /// Returns `None` if the bits do not fit in a `usize`.
    pub fn leaf_index(&self) -> Option<usize> {
        if self.path_indices.len() > usize::BITS as usize {
            return None;
        }
        let mut index = 0usize;
        for (level, &is_right) in self.path_indices.iter().enumerate() {
            if is_right {
                index |= 1 << level;
            }
        }
        Some(index)
    }
}

/// A leaf, its proof and the root it claims membership under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofInput<E> {
    pub leaf: E,
    pub proof: MerkleProof<E>,
    pub root: E,
}
