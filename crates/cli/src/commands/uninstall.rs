//! Fire the uninstall webhook.
//!
//! # Usage
//!
//! ```bash
//! envios uninstall
//! ```
//!
//! # Environment Variables
//!
//! - `ENVIOS_INTEGRATION_TOKEN` - Required, identifies the merchant
//! - `ENVIOS_API_BASE_URL` - Freight API base URL

use std::time::Duration;

use envios_freight::{FreightConfig, UninstallNotifier};

use super::CliError;

/// Extra time granted on top of the HTTP timeout before giving up.
const GRACE: Duration = Duration::from_secs(1);

/// Send the webhook and wait for the attempt to finish.
pub async fn run() -> Result<(), CliError> {
    let config = FreightConfig::from_env()?;
    let notifier = UninstallNotifier::new(&config)?;

    let handle = notifier.notify().ok_or(CliError::MissingToken)?;

    let limit = config.timeout + GRACE;
    tokio::time::timeout(limit, handle)
        .await
        .map_err(|_| CliError::Timeout(limit))??;

    tracing::info!("Uninstall webhook dispatched");
    Ok(())
}
