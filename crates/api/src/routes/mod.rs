//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /api/collections/{handle}   - Simplified collection document (JSON)
//! ```
//!
//! Unknown paths and methods are answered by the router itself (404/405).

pub mod collections;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/collections/{handle}", get(collections::show))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the upstream.
async fn health() -> &'static str {
    "ok"
}
