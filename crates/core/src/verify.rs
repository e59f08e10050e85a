//! Stateless inclusion proof verification.
//!
//! Verification only needs the leaf, the proof, the claimed root and the
//! same oracle the tree was built with. A root mismatch is a normal
//! `Ok(false)`; only structurally malformed proofs are errors.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::MerkleError;
use crate::hasher::HashOracle;
use crate::proof::{MerkleProof, ProofInput};

/// Recompute the root implied by `leaf` and `proof`.
pub fn compute_root<H: HashOracle>(
    leaf: &H::Element,
    proof: &MerkleProof<H::Element>,
    oracle: &H,
) -> Result<H::Element, MerkleError> {
    if proof.path_elements.len() != proof.path_indices.len() {
        return Err(MerkleError::MalformedProof {
            path_elements: proof.path_elements.len(),
            path_indices: proof.path_indices.len(),
        });
    }

    let mut current = leaf.clone();
    for (sibling, &is_right) in proof.path_elements.iter().zip(&proof.path_indices) {
        current = if is_right {
            // Current is right child: H(sibling, current)
            oracle.compress(sibling, &current)
        } else {
            // Current is left child: H(current, sibling)
            oracle.compress(&current, sibling)
        };
    }

    Ok(current)
}

/// Check that `proof` places `leaf` under `root`.
pub fn verify<H: HashOracle>(
    leaf: &H::Element,
    proof: &MerkleProof<H::Element>,
    root: &H::Element,
    oracle: &H,
) -> Result<bool, MerkleError> {
    Ok(compute_root(leaf, proof, oracle)? == *root)
}

/// Verify many independent proofs. Results are in input order.
pub fn verify_batch<H: HashOracle>(
    inputs: &[ProofInput<H::Element>],
    oracle: &H,
) -> Vec<Result<bool, MerkleError>> {
    let check =
        |input: &ProofInput<H::Element>| verify(&input.leaf, &input.proof, &input.root, oracle);

    #[cfg(feature = "parallel")]
    let results: Vec<_> = inputs.par_iter().map(check).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = inputs.iter().map(check).collect();

    results
}
