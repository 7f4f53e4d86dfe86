//! Error types for freight quoting.
//!
//! None of these ever reach the customer. Checkout sees an empty rate list;
//! the site operator sees the error in the logs.

use envios_core::PostalCodeError;
use thiserror::Error;

/// Reasons a package cannot be quoted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Destination postal code has no digits.
    #[error("destination postal code is empty")]
    EmptyPostalCode(#[from] PostalCodeError),

    /// No line item needs shipping.
    #[error("no line item requires shipping")]
    NothingToShip,
}

/// Errors that can occur while quoting a package.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The shipping method is switched off.
    #[error("shipping method is disabled")]
    Disabled,

    /// No integration token configured.
    #[error("no integration token configured")]
    ConfigMissing,

    /// The integration token cannot be sent as a header value.
    #[error("invalid integration token: {0}")]
    InvalidCredential(String),

    /// The package cannot be quoted.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Timeout, DNS failure, refused connection, or any other transport problem.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Freight API answered with a status other than 200/201.
    #[error("freight API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// Response body is not JSON or has no usable `quotes` array.
    #[error("malformed freight response: {0}")]
    MalformedResponse(String),

    /// Request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl QuoteError {
    /// Whether this is an expected skip (method off, no token, nothing to
    /// quote) rather than a failure worth a warning.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::Disabled | Self::ConfigMissing | Self::Validation(_)
        )
    }
}
