//! HTTP API server for Merkle roots, inclusion proofs and verification.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use merkle_core::PoseidonOracle;

mod config;
mod error;
mod extract;
mod handlers;
mod routes;

#[cfg(test)]
mod tests;

use config::ServerConfig;

/// Application state shared across handlers
pub struct AppState {
    /// The one oracle every tree and verification in this process uses.
    pub oracle: Arc<PoseidonOracle>,
    pub config: ServerConfig,
}

/// Build the router with middleware and state attached.
pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .merge(routes::api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("merkle_proof_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!(?config, "starting merkle proof server");

    let state = Arc::new(AppState {
        oracle: Arc::new(PoseidonOracle::new()),
        config: config.clone(),
    });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
