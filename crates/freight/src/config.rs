//! Freight configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ENVIOS_ENABLED` - Whether the shipping method offers rates (default: true)
//! - `ENVIOS_TITLE` - Shipping method title (default: Envios da Olist)
//! - `ENVIOS_INTEGRATION_TOKEN` - Merchant integration token. Without it no rates are offered.
//! - `ENVIOS_DEBUG` - Log request payloads and raw responses (default: false)
//! - `ENVIOS_API_BASE_URL` - Freight API base URL (default: <https://envios-api.olist.com>)
//! - `ENVIOS_TIMEOUT_SECS` - HTTP timeout in seconds (default: 10)
//! - `ENVIOS_CACHE_TTL_SECS` - Quote cache TTL in seconds (default: 300)
//! - `ENVIOS_LOCALE` - Label locale, `pt-BR` or `en` (default: pt-BR)
//! - `ENVIOS_WEIGHT_UNIT` - Store weight unit: kg, g, lbs, oz (default: kg)
//! - `ENVIOS_DIMENSION_UNIT` - Store dimension unit: cm, m, mm, in, yd (default: cm)

use std::time::Duration;

use envios_core::{DimensionUnit, Locale, WeightUnit};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Default freight API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://envios-api.olist.com";

/// Default shipping method title.
pub const DEFAULT_TITLE: &str = "Envios da Olist";

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default quote cache TTL (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Freight integration settings.
///
/// Implements `Debug` manually to redact the integration token.
#[derive(Clone)]
pub struct FreightConfig {
    /// Whether the shipping method offers rates at all
    pub enabled: bool,
    /// Shipping method title, used when a quote has no display name
    pub title: String,
    /// Merchant integration token (`x-integration-id`)
    pub integration_token: Option<SecretString>,
    /// Log request payloads and raw responses
    pub debug: bool,
    /// Freight API base URL, without trailing slash
    pub api_base_url: String,
    /// HTTP timeout for every freight API call
    pub timeout: Duration,
    /// How long a successful quote list is reused
    pub cache_ttl: Duration,
    /// Locale for delivery-time labels
    pub locale: Locale,
    /// Store weight unit
    pub weight_unit: WeightUnit,
    /// Store dimension unit
    pub dimension_unit: DimensionUnit,
}

impl std::fmt::Debug for FreightConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreightConfig")
            .field("enabled", &self.enabled)
            .field("title", &self.title)
            .field(
                "integration_token",
                &self.integration_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("debug", &self.debug)
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .field("cache_ttl", &self.cache_ttl)
            .field("locale", &self.locale)
            .field("weight_unit", &self.weight_unit)
            .field("dimension_unit", &self.dimension_unit)
            .finish()
    }
}

impl Default for FreightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: DEFAULT_TITLE.to_string(),
            integration_token: None,
            debug: false,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            locale: Locale::default(),
            weight_unit: WeightUnit::default(),
            dimension_unit: DimensionUnit::default(),
        }
    }
}

impl FreightConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let enabled = parse_bool(&lookup, "ENVIOS_ENABLED", true)?;
        let title = lookup("ENVIOS_TITLE")
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let integration_token = lookup("ENVIOS_INTEGRATION_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(SecretString::from);
        let debug = parse_bool(&lookup, "ENVIOS_DEBUG", false)?;

        let api_base_url = lookup("ENVIOS_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = normalize_base_url(&api_base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("ENVIOS_API_BASE_URL".to_string(), e))?;

        let timeout = parse_secs(&lookup, "ENVIOS_TIMEOUT_SECS", DEFAULT_TIMEOUT)?;
        let cache_ttl = parse_secs(&lookup, "ENVIOS_CACHE_TTL_SECS", DEFAULT_CACHE_TTL)?;

        let locale = parse_with(&lookup, "ENVIOS_LOCALE")?.unwrap_or_default();
        let weight_unit = parse_with(&lookup, "ENVIOS_WEIGHT_UNIT")?.unwrap_or_default();
        let dimension_unit = parse_with(&lookup, "ENVIOS_DIMENSION_UNIT")?.unwrap_or_default();

        Ok(Self {
            enabled,
            title,
            integration_token,
            debug,
            api_base_url,
            timeout,
            cache_ttl,
            locale,
            weight_unit,
            dimension_unit,
        })
    }

    /// Returns the integration token if one is configured and not blank.
    #[must_use]
    pub fn credential(&self) -> Option<&SecretString> {
        self.integration_token
            .as_ref()
            .filter(|token| !token.expose_secret().trim().is_empty())
    }

    /// URL of the freight quote endpoint.
    #[must_use]
    pub fn quote_url(&self) -> String {
        format!("{}/v1/freights/woocommerce", self.api_base_url)
    }

    /// URL of the uninstall webhook.
    #[must_use]
    pub fn uninstall_url(&self) -> String {
        format!(
            "{}/v1/webhook/ecommerce/woocommerce/app-uninstall",
            self.api_base_url
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate a base URL and strip any trailing slash.
fn normalize_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|e| e.to_string())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", parsed.scheme()));
    }
    Ok(trimmed.to_string())
}

/// Parse a boolean flag, accepting the usual spellings.
fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(default);
    };

    match value.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

/// Parse a positive number of seconds.
fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(default);
    };

    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

/// Parse an optional variable with `FromStr`.
fn parse_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}
