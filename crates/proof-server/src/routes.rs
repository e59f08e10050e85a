//! API route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::AppState;

/// Create API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Tree construction and proof derivation
        .route("/api/tree/root", post(handlers::tree_root))
        .route("/api/tree/proof", post(handlers::tree_proof))
        // Stateless verification
        .route("/api/proof/verify", post(handlers::verify_proof))
}
