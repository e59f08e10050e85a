//! Merkle tree construction and inclusion proofs.
//!
//! This crate provides:
//! - `HashOracle`: the two-to-one compression contract the tree is built with
//! - `PoseidonOracle`: a Poseidon instance over the BN254 scalar field
//! - `MerkleTree`: layer-by-layer construction and proof derivation
//! - `verify` / `compute_root`: stateless proof verification
//! - `CircuitInput`: the `{ leaf, pathElements, pathIndices, root }` shape
//!   consumed by external circuit verifiers

pub mod codec;
pub mod error;
pub mod hasher;
pub mod poseidon;
pub mod proof;
pub mod tree;
pub mod verify;


pub use codec::{CircuitInput, DecimalElement};
pub use error::MerkleError;
pub use hasher::{FnOracle, HashOracle};
pub use poseidon::{poseidon_config, PoseidonOracle};
pub use proof::{MerkleProof, ProofInput};
pub use tree::MerkleTree;
pub use verify::{compute_root, verify, verify_batch};

use ark_bn254::Fr;

/// Field the Poseidon oracle operates over.
pub type ConstraintF = Fr;
