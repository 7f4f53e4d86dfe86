//! Uninstall webhook notifier.
//!
//! Tells the freight platform that the merchant removed the integration.
//! Fire-and-forget: one attempt, no retry, the outcome is only logged.

use secrecy::SecretString;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::client::{FreightClient, UninstallEvent};
use crate::config::FreightConfig;
use crate::error::QuoteError;

/// Sends the uninstall webhook.
#[derive(Clone)]
pub struct UninstallNotifier {
    client: FreightClient,
    token: Option<SecretString>,
}

impl UninstallNotifier {
    /// Create a notifier with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &FreightConfig) -> Result<Self, QuoteError> {
        Ok(Self::with_client(FreightClient::new(config)?, config))
    }

    /// Create a notifier sharing an existing client.
    #[must_use]
    pub fn with_client(client: FreightClient, config: &FreightConfig) -> Self {
        Self {
            client,
            token: config.credential().cloned(),
        }
    }

    /// Dispatch the webhook in the background.
    ///
    /// Returns `None` without sending anything when no token is configured or
    /// when called outside a Tokio runtime. The returned handle may be
    /// dropped; awaiting it only waits for the single attempt to finish.
    #[must_use = "dropping the handle is fine, but short-lived processes should await it"]
    pub fn notify(&self) -> Option<JoinHandle<()>> {
        let Some(token) = self.token.clone() else {
            tracing::debug!("No integration token configured, skipping uninstall webhook");
            return None;
        };

        let Ok(runtime) = Handle::try_current() else {
            tracing::debug!("No async runtime, skipping uninstall webhook");
            return None;
        };

        let client = self.client.clone();
        let event = UninstallEvent::at(chrono::Utc::now().timestamp());

        Some(runtime.spawn(async move {
            match client.notify_uninstall(&token, event).await {
                Ok(status) => tracing::debug!(status = %status, "Uninstall webhook sent"),
                Err(e) => tracing::debug!(error = %e, "Uninstall webhook failed"),
            }
        }))
    }
}
