//! Core types for Envios.
//!
//! This module provides type-safe wrappers for the shipping domain.

pub mod delivery;
pub mod offer;
pub mod package;
pub mod postal_code;
pub mod units;

pub use delivery::{Locale, LocaleError, format_delivery_time, with_delivery_time};
pub use offer::{METHOD_ID, OFFER_ID_PREFIX, OfferMetadata, ShippingRateOffer};
pub use package::{LineItem, ShippingPackage};
pub use postal_code::{PostalCode, PostalCodeError};
pub use units::{DimensionUnit, UnitError, WeightUnit};
