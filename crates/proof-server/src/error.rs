//! API error type and its HTTP mapping.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use merkle_core::MerkleError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Merkle(#[from] MerkleError),

    /// Indices the core cannot represent (negative or wider than usize).
    #[error("Leaf index {index} out of range for tree with {leaf_count} leaves")]
    IndexOutOfRange { index: i128, leaf_count: usize },

    /// Deeper than any tree this server would build.
    #[error("Malformed proof: depth {depth} exceeds the maximum of {max}")]
    ProofTooDeep { depth: usize, max: usize },

    /// Body rejected by the JSON extractor.
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Too many leaves: {count} exceeds the limit of {max}")]
    TooManyLeaves { count: usize, max: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Merkle(MerkleError::InvalidInput(_)) => "InvalidInput",
            ApiError::Merkle(MerkleError::IndexOutOfRange { .. })
            | ApiError::IndexOutOfRange { .. } => "IndexOutOfRange",
            ApiError::Merkle(MerkleError::MalformedProof { .. })
            | ApiError::Merkle(MerkleError::InvalidDirection { .. })
            | ApiError::ProofTooDeep { .. } => "MalformedProof",
            ApiError::Merkle(MerkleError::InvalidElement { .. }) => "InvalidElement",
            ApiError::TooManyLeaves { .. } => "TooManyLeaves",
            ApiError::InvalidRequest(_) => "InvalidRequest",
            ApiError::Internal(_) => "Internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::TooManyLeaves { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, kind = self.kind(), "rejected request");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}
