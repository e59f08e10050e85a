//! Merkle tree built layer by layer over an ordered leaf sequence.
//!
//! Layer 0 holds the leaves; layer k+1 is the pairwise compression of
//! layer k. When a layer has odd length the last node is compressed with
//! the oracle's padding value (zero), it is never duplicated.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::error::MerkleError;
use crate::hasher::HashOracle;
use crate::proof::{MerkleProof, ProofInput};

/// Layers with at least this many nodes are compressed on the rayon pool.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 1 << 10;

/// Immutable Merkle tree.
///
/// Owns every layer from the leaves up to the single-element root layer, so
/// proofs can be derived without recomputing hashes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree<E> {
    /// layers[0] = leaves, layers[height] = [root]
    layers: Vec<Vec<E>>,

    /// Padding the tree was built with, reused for missing siblings.
    padding: E,
}

impl<E: Clone + PartialEq + Send + Sync> MerkleTree<E> {
    /// Build a tree over `leaves`.
    ///
    /// Fails with `InvalidInput` if `leaves` is empty. A single leaf is its
    /// own root and the tree has height 0.
    pub fn new<H>(leaves: Vec<E>, oracle: &H) -> Result<Self, MerkleError>
    where
        H: HashOracle<Element = E>,
    {
        if leaves.is_empty() {
            return Err(MerkleError::InvalidInput(
                "cannot build a Merkle tree from an empty leaf set".to_string(),
            ));
        }

        let padding = oracle.padding();
        let leaf_count = leaves.len();
        let mut layers = vec![leaves];

        loop {
            let current = &layers[layers.len() - 1];
            if current.len() == 1 {
                break;
            }
            let next = compress_layer(current, oracle, &padding);
            layers.push(next);
        }

        debug!(leaf_count, height = layers.len() - 1, "built merkle tree");

        Ok(Self { layers, padding })
    }

    /// Get the root.
    pub fn root(&self) -> &E {
        // Construction guarantees a non-empty last layer of length 1.
        &self.layers[self.layers.len() - 1][0]
    }

    /// Get the leaves in insertion order.
    pub fn leaves(&self) -> &[E] {
        &self.layers[0]
    }

    pub fn leaf(&self, index: usize) -> Option<&E> {
        self.layers[0].get(index)
    }

    /// All layers, leaves first.
    pub fn layers(&self) -> &[Vec<E>] {
        &self.layers
    }

    pub fn layer(&self, level: usize) -> Option<&[E]> {
        self.layers.get(level).map(Vec::as_slice)
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    /// Always false: construction rejects empty leaf sets.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of hashing levels above the leaves, equal to every proof's length.
    pub fn height(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn padding(&self) -> &E {
        &self.padding
    }

    /// Position of the first leaf equal to `leaf`.
    pub fn index_of(&self, leaf: &E) -> Option<usize> {
        self.layers[0].iter().position(|l| l == leaf)
    }

    /// Generate the inclusion proof for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Result<MerkleProof<E>, MerkleError> {
        if index >= self.len() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                leaf_count: self.len(),
            });
        }

        let height = self.height();
        let mut path_elements = Vec::with_capacity(height);
        let mut path_indices = Vec::with_capacity(height);

        let mut current_index = index;
        for layer in &self.layers[..height] {
            let is_right = current_index & 1 == 1;
            let sibling_index = if is_right {
                current_index - 1
            } else {
                current_index + 1
            };
            let sibling = layer
                .get(sibling_index)
                .cloned()
                .unwrap_or_else(|| self.padding.clone());

            path_elements.push(sibling);
            path_indices.push(is_right);
            current_index >>= 1;
        }

        debug!(index, depth = path_elements.len(), "derived merkle proof");

        Ok(MerkleProof::new(path_elements, path_indices))
    }

    /// Bundle the leaf at `index`, its proof and the root.
    pub fn proof_input(&self, index: usize) -> Result<ProofInput<E>, MerkleError> {
        let proof = self.proof(index)?;
        Ok(ProofInput {
            leaf: self.layers[0][index].clone(),
            proof,
            root: self.root().clone(),
        })
    }
}

/// Compress adjacent pairs of `layer`, padding the unpaired tail.
fn compress_layer<H: HashOracle>(
    layer: &[H::Element],
    oracle: &H,
    padding: &H::Element,
) -> Vec<H::Element> {
    let hash_pair = |pair: &[H::Element]| {
        let right = pair.get(1).unwrap_or(padding);
        oracle.compress(&pair[0], right)
    };

    #[cfg(feature = "parallel")]
    if layer.len() >= PARALLEL_THRESHOLD {
        return layer.par_chunks(2).map(hash_pair).collect();
    }

    layer.chunks(2).map(hash_pair).collect()
}
