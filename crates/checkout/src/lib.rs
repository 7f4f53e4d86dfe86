//! Envios checkout service.
//!
//! Exposes the freight adapter over HTTP so a checkout can ask for rates
//! without linking the Rust crates directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod routes;
pub mod state;

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use envios_freight::QuoteError;
use thiserror::Error;
use tower_http::trace::TraceLayer;

pub use config::{CheckoutConfig, ConfigError};
pub use state::AppState;

/// Errors that stop the service from starting or keep it from running.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Failed to initialize application state: {0}")]
    State(#[from] QuoteError),

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build the service router with its state attached.
///
/// Tracing and Sentry layers are added by [`serve`].
#[must_use]
pub fn app(state: AppState) -> Router {
    routes::routes().with_state(state)
}

/// Bind the configured address and serve until `shutdown` completes.
///
/// # Errors
///
/// Returns [`ServeError`] if the state cannot be built, the address cannot
/// be bound, or the server fails while running.
pub async fn serve(
    config: CheckoutConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServeError> {
    let addr = config.socket_addr();
    let state = AppState::new(config)?;

    let app = app(state)
        .layer(TraceLayer::new_for_http())
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;

    tracing::info!("checkout listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServeError::Serve)
}
