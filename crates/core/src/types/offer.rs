//! Checkout shipping-rate offers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shipping method identifier registered with checkout.
pub const METHOD_ID: &str = "olist_envios";

/// Prefix of every offer ID produced by this shipping method.
pub const OFFER_ID_PREFIX: &str = "olist-envios.";

/// A selectable shipping option shown at checkout.
///
/// Built once per quote; the label already carries the delivery-time suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRateOffer {
    /// Stable identifier, e.g. `olist-envios.correios-sedex`.
    pub id: String,
    /// Customer-facing label, e.g. `SEDEX (2 dias úteis)`.
    pub label: String,
    /// Total shipping cost, as quoted.
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    /// Estimated delivery time in business days (0 when unknown).
    pub delivery_time: u32,
    /// Extra data for later display steps.
    pub metadata: OfferMetadata,
}

/// Metadata attached to an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferMetadata {
    /// Delivery time in business days.
    pub delivery_time: u32,
    /// Formatted delivery time (`"2 dias úteis"`), absent when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time_label: Option<String>,
    /// Carrier slug the offer ID was built from.
    pub carrier: String,
    /// Carrier name as reported by the freight API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_name: Option<String>,
}

impl ShippingRateOffer {
    /// Whether the offer belongs to this shipping method.
    #[must_use]
    pub fn is_own(&self) -> bool {
        self.id.starts_with(OFFER_ID_PREFIX)
    }
}
