//! Error kinds reported by tree construction, proof derivation and verification.

use thiserror::Error;

/// Errors raised by the Merkle core.
///
/// A proof that is well-formed but does not recompute the claimed root is
/// not an error: `verify` returns `Ok(false)` for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Leaf index {index} out of range for tree with {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    #[error("Malformed proof: {path_elements} path elements but {path_indices} path indices")]
    MalformedProof {
        path_elements: usize,
        path_indices: usize,
    },

    #[error("Malformed proof: path index {value} at level {level} is not 0 or 1")]
    InvalidDirection { level: usize, value: i64 },

    #[error("Invalid field element {value:?}: {reason}")]
    InvalidElement { value: String, reason: String },
}

impl MerkleError {
    /// True for the structural failures a verifier must report instead of `false`.
    pub fn is_malformed_proof(&self) -> bool {
        matches!(
            self,
            MerkleError::MalformedProof { .. } | MerkleError::InvalidDirection { .. }
        )
    }
}
