//! Application state shared across all handlers.

use std::sync::Arc;

use envios_freight::{QuoteAdapter, QuoteError};

use crate::config::CheckoutConfig;

/// Application state shared across all handlers.
///
/// Cheap to clone; the adapter and its cache live behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CheckoutConfig,
    adapter: QuoteAdapter,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the freight HTTP client fails to build.
    pub fn new(config: CheckoutConfig) -> Result<Self, QuoteError> {
        let adapter = QuoteAdapter::new(config.freight.clone())?;
        Ok(Self::with_adapter(config, adapter))
    }

    /// Build state around an existing adapter.
    #[must_use]
    pub fn with_adapter(config: CheckoutConfig, adapter: QuoteAdapter) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, adapter }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &CheckoutConfig {
        &self.inner.config
    }

    /// Get a reference to the quote adapter.
    #[must_use]
    pub fn adapter(&self) -> &QuoteAdapter {
        &self.inner.adapter
    }
}
