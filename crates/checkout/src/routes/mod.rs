//! HTTP route handlers for the checkout service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health           - Health check
//! POST /shipping/rates   - Shipping offers for a package
//! ```

pub mod shipping;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the application router.
#[must_use]
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/shipping/rates", post(shipping::rates))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
