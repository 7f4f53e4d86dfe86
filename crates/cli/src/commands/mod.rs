//! CLI subcommands.

pub mod quote;
pub mod uninstall;

use thiserror::Error;

/// Errors a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] envios_freight::ConfigError),

    /// Package file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Package file is not a valid package.
    #[error("Invalid package JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Quote or client construction failed.
    #[error(transparent)]
    Quote(#[from] envios_freight::QuoteError),

    /// No integration token configured.
    #[error("ENVIOS_INTEGRATION_TOKEN is not set")]
    MissingToken,

    /// Webhook task did not finish in time.
    #[error("Uninstall webhook did not complete within {0:?}")]
    Timeout(std::time::Duration),

    /// Webhook task panicked or was cancelled.
    #[error("Uninstall webhook task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
