//! HTTP request handlers for tree construction, proofs and verification.

use std::sync::Arc;

use ark_bn254::Fr;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use merkle_core::{verify, CircuitInput, DecimalElement, MerkleTree};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Leaves as decimal strings, in tree order.
#[derive(Debug, Deserialize)]
pub struct TreeRequest {
    pub leaves: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootResponse {
    pub root: String,
    pub leaf_count: usize,
    pub height: usize,
}

#[derive(Debug, Deserialize)]
pub struct ProofRequest {
    pub leaves: Vec<String>,
    /// Wide enough that any out-of-range integer still parses.
    pub index: i128,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

/// Parse decimal leaves, enforcing the configured size limit.
fn parse_leaves(leaves: &[String], max_leaves: usize) -> Result<Vec<Fr>, ApiError> {
    if leaves.len() > max_leaves {
        return Err(ApiError::TooManyLeaves {
            count: leaves.len(),
            max: max_leaves,
        });
    }

    leaves
        .iter()
        .map(|leaf| Fr::from_decimal(leaf).map_err(ApiError::from))
        .collect()
}

/// Build the tree off the async runtime; hashing large leaf sets is CPU-bound.
async fn build_tree(state: &AppState, leaves: Vec<String>) -> Result<MerkleTree<Fr>, ApiError> {
    let leaves = parse_leaves(&leaves, state.config.max_leaves)?;
    let oracle = Arc::clone(&state.oracle);

    let tree = tokio::task::spawn_blocking(move || MerkleTree::new(leaves, oracle.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(tree)
}

pub async fn tree_root(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<TreeRequest>,
) -> Result<Json<RootResponse>, ApiError> {
    let tree = build_tree(&state, req.leaves).await?;

    info!(leaf_count = tree.len(), height = tree.height(), "computed root");

    Ok(Json(RootResponse {
        root: tree.root().to_decimal(),
        leaf_count: tree.len(),
        height: tree.height(),
    }))
}

pub async fn tree_proof(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ProofRequest>,
) -> Result<Json<CircuitInput>, ApiError> {
    let tree = build_tree(&state, req.leaves).await?;
    let leaf_count = tree.len();
    let index = usize::try_from(req.index).map_err(|_| ApiError::IndexOutOfRange {
        index: req.index,
        leaf_count,
    })?;
    let input = tree.proof_input(index)?;

    info!(index, leaf_count, depth = input.proof.depth(), "derived proof");

    Ok(Json(CircuitInput::encode(&input)))
}

pub async fn verify_proof(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CircuitInput>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let max = max_proof_depth(state.config.max_leaves);
    let depth = req.path_elements.len().max(req.path_indices.len());
    if depth > max {
        return Err(ApiError::ProofTooDeep { depth, max });
    }

    let input = req.decode::<Fr>()?;
    let oracle = Arc::clone(&state.oracle);

    let (valid, depth) = tokio::task::spawn_blocking(move || {
        verify(&input.leaf, &input.proof, &input.root, oracle.as_ref())
            .map(|valid| (valid, input.proof.depth()))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    debug!(valid, depth, "verified proof");

    Ok(Json(VerifyResponse { valid }))
}

/// Height of the tallest tree the server builds: ceil(log2(max_leaves)).
pub fn max_proof_depth(max_leaves: usize) -> usize {
    (usize::BITS - max_leaves.saturating_sub(1).leading_zeros()) as usize
}
