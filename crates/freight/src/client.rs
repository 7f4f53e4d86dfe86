//! Freight API HTTP client.
//!
//! Thin wrapper over `reqwest`: it knows the endpoints, the authentication
//! header and which statuses count as success. It does not interpret quote
//! bodies; that happens in [`crate::response`].

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use crate::config::FreightConfig;
use crate::error::QuoteError;

/// Authentication header understood by the freight API.
pub const INTEGRATION_HEADER: &str = "x-integration-id";

/// Longest slice of an error body kept for logs.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Freight API client.
#[derive(Clone)]
pub struct FreightClient {
    inner: Arc<FreightClientInner>,
}

struct FreightClientInner {
    client: reqwest::Client,
    quote_url: String,
    uninstall_url: String,
}

/// Body of the uninstall webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UninstallEvent {
    pub timestamp: i64,
    pub action: &'static str,
}

impl UninstallEvent {
    /// Uninstall event at the given unix time.
    #[must_use]
    pub const fn at(timestamp: i64) -> Self {
        Self {
            timestamp,
            action: "uninstall",
        }
    }
}

impl FreightClient {
    /// Create a new freight API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &FreightConfig) -> Result<Self, QuoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(FreightClientInner {
                client,
                quote_url: config.quote_url(),
                uninstall_url: config.uninstall_url(),
            }),
        })
    }

    /// Post a serialized quote request and return the raw response body.
    ///
    /// Only 200 and 201 are accepted as success.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Transport`] on network failure or timeout and
    /// [`QuoteError::Upstream`] on any other status.
    #[instrument(skip_all, fields(url = %self.inner.quote_url))]
    pub async fn request_quotes(
        &self,
        token: &SecretString,
        body: String,
    ) -> Result<String, QuoteError> {
        let response = self
            .inner
            .client
            .post(&self.inner.quote_url)
            .header(INTEGRATION_HEADER, auth_header(token)?)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !is_quote_success(status) {
            tracing::debug!(
                status = %status,
                body = %truncate(&text),
                "Freight API returned non-success status"
            );
            return Err(QuoteError::Upstream {
                status: status.as_u16(),
                body: truncate(&text),
            });
        }

        Ok(text)
    }

    /// Post the uninstall webhook and return the response status.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be sent.
    #[instrument(skip_all, fields(url = %self.inner.uninstall_url))]
    pub async fn notify_uninstall(
        &self,
        token: &SecretString,
        event: UninstallEvent,
    ) -> Result<StatusCode, QuoteError> {
        let response = self
            .inner
            .client
            .post(&self.inner.uninstall_url)
            .header(INTEGRATION_HEADER, auth_header(token)?)
            .body(serde_json::to_string(&event)?)
            .send()
            .await?;

        Ok(response.status())
    }
}

/// Build the sensitive `x-integration-id` header value.
fn auth_header(token: &SecretString) -> Result<HeaderValue, QuoteError> {
    let mut value = HeaderValue::from_str(token.expose_secret().trim())
        .map_err(|e| QuoteError::InvalidCredential(e.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// 200 and 201 are the only success statuses for a quote.
fn is_quote_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
