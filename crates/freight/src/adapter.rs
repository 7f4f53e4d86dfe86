//! Checkout quote adapter.
//!
//! Turns a cart package into checkout offers:
//!
//! 1. check the method is enabled and a token is configured
//! 2. build the quote request (postal code and shippable items validated)
//! 3. serve from cache when a live entry exists for the request body
//! 4. otherwise post to the freight API, parse quotes, cache non-empty results
//! 5. map quotes to offers
//!
//! Checkout calls [`QuoteAdapter::calculate_shipping`], which never fails:
//! any error means "no rates from this method".

use std::sync::Arc;

use envios_core::{ShippingPackage, ShippingRateOffer};
use tracing::instrument;

use crate::cache::QuoteCache;
use crate::client::FreightClient;
use crate::config::FreightConfig;
use crate::error::QuoteError;
use crate::offers::build_offers;
use crate::request::{QuoteRequest, cache_key};
use crate::response::{Quote, parse_quotes};

/// Log target for request/response dumps when debug mode is on.
pub const DEBUG_TARGET: &str = "envios_freight::debug";

/// Quote adapter shared by every checkout session.
#[derive(Clone)]
pub struct QuoteAdapter {
    inner: Arc<QuoteAdapterInner>,
}

struct QuoteAdapterInner {
    config: FreightConfig,
    client: FreightClient,
    cache: QuoteCache,
}

impl QuoteAdapter {
    /// Create an adapter with its own HTTP client and cache.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: FreightConfig) -> Result<Self, QuoteError> {
        let client = FreightClient::new(&config)?;
        let cache = QuoteCache::new(config.cache_ttl);
        Ok(Self::with_parts(config, client, cache))
    }

    /// Create an adapter from an existing client and cache.
    #[must_use]
    pub fn with_parts(config: FreightConfig, client: FreightClient, cache: QuoteCache) -> Self {
        Self {
            inner: Arc::new(QuoteAdapterInner {
                config,
                client,
                cache,
            }),
        }
    }

    /// Configuration the adapter was built with.
    #[must_use]
    pub fn config(&self) -> &FreightConfig {
        &self.inner.config
    }

    /// The quote cache.
    #[must_use]
    pub fn cache(&self) -> &QuoteCache {
        &self.inner.cache
    }

    /// Offers for a package, or an empty list when anything goes wrong.
    pub async fn calculate_shipping(&self, package: &ShippingPackage) -> Vec<ShippingRateOffer> {
        match self.quote(package).await {
            Ok(offers) => offers,
            Err(e) if e.is_skip() => {
                tracing::debug!(reason = %e, "No freight quote for package");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Freight quote failed");
                Vec::new()
            }
        }
    }

    /// Offers for a package.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError`] describing why no offers could be produced.
    #[instrument(skip_all, fields(items = package.items.len()))]
    pub async fn quote(
        &self,
        package: &ShippingPackage,
    ) -> Result<Vec<ShippingRateOffer>, QuoteError> {
        let config = &self.inner.config;

        if !config.enabled {
            return Err(QuoteError::Disabled);
        }
        let token = config.credential().ok_or(QuoteError::ConfigMissing)?;

        let request =
            QuoteRequest::from_package(package, config.weight_unit, config.dimension_unit)?;
        let body = request.to_json()?;
        let key = cache_key(&body);

        if let Some(quotes) = self.inner.cache.get(&key).await {
            tracing::debug!(cache_key = %key, quotes = quotes.len(), "Freight quote cache hit");
            return Ok(self.offers(&quotes));
        }

        if config.debug {
            tracing::info!(target: DEBUG_TARGET, payload = %body, "Freight quote request");
        }

        let raw = self.inner.client.request_quotes(token, body).await;

        if config.debug {
            match &raw {
                Ok(text) => {
                    tracing::info!(
                        target: DEBUG_TARGET,
                        response = %text,
                        "Freight quote response"
                    );
                }
                Err(e) => {
                    tracing::info!(target: DEBUG_TARGET, error = %e, "Freight quote response");
                }
            }
        }

        let quotes = parse_quotes(&raw?)?;
        let offers = self.offers(&quotes);

        if self.inner.cache.insert(key, quotes).await {
            tracing::debug!(offers = offers.len(), "Freight quotes cached");
        }

        Ok(offers)
    }

    fn offers(&self, quotes: &[Quote]) -> Vec<ShippingRateOffer> {
        let offers = build_offers(quotes, &self.inner.config.title, self.inner.config.locale);
        debug_assert!(offers.iter().all(ShippingRateOffer::is_own));
        offers
    }
}
