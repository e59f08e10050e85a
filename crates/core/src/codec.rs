//! Decimal-string encoding of proofs for external circuit verifiers.
//!
//! External verifiers consume `{ leaf, pathElements, pathIndices, root }`
//! with field elements as base-10 integer strings and direction bits as
//! 0 (left child) / 1 (right child).

use ark_ff::PrimeField;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::MerkleError;
use crate::proof::{MerkleProof, ProofInput};

/// Conversion between a domain element and its canonical decimal string.
pub trait DecimalElement: Sized {
    fn to_decimal(&self) -> String;

    fn from_decimal(value: &str) -> Result<Self, MerkleError>;
}

impl<F: PrimeField> DecimalElement for F {
    fn to_decimal(&self) -> String {
        let value: BigUint = (*self).into();
        value.to_string()
    }

    /// Parse a base-10 integer. Values at or above the modulus are rejected
    /// rather than reduced, so every element has exactly one encoding.
    fn from_decimal(value: &str) -> Result<Self, MerkleError> {
        let invalid = |reason: &str| MerkleError::InvalidElement {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a non-negative base-10 integer"));
        }

        let parsed = BigUint::parse_bytes(value.as_bytes(), 10)
            .ok_or_else(|| invalid("expected a non-negative base-10 integer"))?;
        let modulus: BigUint = F::MODULUS.into();
        if parsed >= modulus {
            return Err(invalid("value is not below the field modulus"));
        }

        Ok(F::from(parsed))
    }
}

/// Proof in the shape external circuits take as input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitInput {
    pub leaf: String,
    pub path_elements: Vec<String>,
    /// Signed so out-of-range directions still parse and are rejected here.
    pub path_indices: Vec<i64>,
    pub root: String,
}

impl CircuitInput {
    pub fn encode<E: DecimalElement>(input: &ProofInput<E>) -> Self {
        Self {
            leaf: input.leaf.to_decimal(),
            path_elements: input
                .proof
                .path_elements
                .iter()
                .map(DecimalElement::to_decimal)
                .collect(),
            path_indices: input
                .proof
                .path_indices
                .iter()
                .map(|&is_right| i64::from(is_right))
                .collect(),
            root: input.root.to_decimal(),
        }
    }

    /// Parse every element and direction bit.
    ///
    /// Mismatched `pathElements`/`pathIndices` lengths are kept as-is so the
    /// verifier reports them as `MalformedProof`.
    pub fn decode<E: DecimalElement>(&self) -> Result<ProofInput<E>, MerkleError> {
        let leaf = E::from_decimal(&self.leaf)?;
        let root = E::from_decimal(&self.root)?;

        let path_elements = self
            .path_elements
            .iter()
            .map(|e| E::from_decimal(e))
            .collect::<Result<Vec<_>, _>>()?;

        let path_indices = self
            .path_indices
            .iter()
            .enumerate()
            .map(|(level, &value)| match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(MerkleError::InvalidDirection { level, value }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProofInput {
            leaf,
            proof: MerkleProof::new(path_elements, path_indices),
            root,
        })
    }
}
