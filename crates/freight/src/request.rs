//! Freight quote request payload.
//!
//! The payload is built deterministically from the package, so its JSON form
//! doubles as the cache key.

use envios_core::{DimensionUnit, LineItem, PostalCode, ShippingPackage, WeightUnit};
use rust_decimal::Decimal;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// Minimum weight sent for a product, in kilograms.
pub const MIN_WEIGHT_KG: f64 = 0.1;

/// Minimum length, width and height sent for a product, in centimeters.
pub const MIN_DIMENSION_CM: f64 = 1.0;

/// Prefix of every quote cache key.
pub const CACHE_KEY_PREFIX: &str = "olist_envios_quote_";

/// Body of `POST /v1/freights/woocommerce`.
///
/// Field order is fixed by the struct layout, which keeps the serialized form
/// canonical.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRequest {
    pub to: Destination,
    pub products: Vec<ProductLine>,
}

/// Quote destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub postal_code: PostalCode,
}

/// One product in the quote request, in kilograms and centimeters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_value: Decimal,
    pub quantity: u32,
    pub weight: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl QuoteRequest {
    /// Build a request from a cart package.
    ///
    /// Lines that do not need shipping are left out. Weights and dimensions
    /// are converted to kg/cm and raised to [`MIN_WEIGHT_KG`] /
    /// [`MIN_DIMENSION_CM`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the postal code has no digits or no
    /// line needs shipping.
    pub fn from_package(
        package: &ShippingPackage,
        weight_unit: WeightUnit,
        dimension_unit: DimensionUnit,
    ) -> Result<Self, ValidationError> {
        let postal_code = PostalCode::parse(&package.destination_postal_code)?;

        if !package.needs_shipping() {
            return Err(ValidationError::NothingToShip);
        }

        let products = package
            .shippable_items()
            .map(|item| ProductLine::from_item(item, weight_unit, dimension_unit))
            .collect();

        Ok(Self {
            to: Destination { postal_code },
            products,
        })
    }

    /// Serialize to the JSON body sent to the freight API.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ProductLine {
    fn from_item(item: &LineItem, weight_unit: WeightUnit, dimension_unit: DimensionUnit) -> Self {
        Self {
            reference: item
                .reference
                .as_ref()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            unit_value: item.unit_price,
            quantity: item.quantity,
            weight: at_least(weight_unit.to_kg(item.weight), MIN_WEIGHT_KG),
            length: at_least(dimension_unit.to_cm(item.length), MIN_DIMENSION_CM),
            width: at_least(dimension_unit.to_cm(item.width), MIN_DIMENSION_CM),
            height: at_least(dimension_unit.to_cm(item.height), MIN_DIMENSION_CM),
        }
    }
}

/// Raise a measurement to its floor; NaN and infinities become the floor.
fn at_least(value: f64, floor: f64) -> f64 {
    if value.is_finite() { value.max(floor) } else { floor }
}

/// Cache key for a serialized request body.
#[must_use]
pub fn cache_key(body: &str) -> String {
    let digest = Sha256::digest(body.as_bytes());
    format!("{CACHE_KEY_PREFIX}{}", hex::encode(digest))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(weight: f64, length: f64, width: f64, height: f64) -> LineItem {
        LineItem {
            reference: Some("42".to_string()),
            unit_price: Decimal::new(4990, 2),
            quantity: 2,
            weight,
            length,
            width,
            height,
            needs_shipping: true,
        }
    }

    fn build(package: &ShippingPackage) -> Result<QuoteRequest, ValidationError> {
        QuoteRequest::from_package(package, WeightUnit::Kg, DimensionUnit::Cm)
    }

    #[test]
    fn test_request_json_shape() {
        let package = ShippingPackage::new("01310-100").with_item(item(1.5, 20.0, 15.0, 10.0));
        let body = build(&package).unwrap().to_json().unwrap();
        assert_eq!(
            body,
            r#"{"to":{"postal_code":"01310100"},"products":[{"reference":"42","unit_value":49.9,"quantity":2,"weight":1.5,"length":20.0,"width":15.0,"height":10.0}]}"#
        );
    }

    #[test]
    fn test_zero_measurements_use_floors() {
        let package = ShippingPackage::new("01310100").with_item(item(0.0, 0.0, 0.0, 0.0));
        let request = build(&package).unwrap();
        let line = &request.products[0];
        assert!((line.weight - MIN_WEIGHT_KG).abs() < f64::EPSILON);
        assert!((line.length - MIN_DIMENSION_CM).abs() < f64::EPSILON);
        assert!((line.width - MIN_DIMENSION_CM).abs() < f64::EPSILON);
        assert!((line.height - MIN_DIMENSION_CM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_and_nan_measurements_use_floors() {
        let package = ShippingPackage::new("01310100").with_item(item(-3.0, f64::NAN, 5.0, 0.4));
        let line = &build(&package).unwrap().products[0];
        assert!((line.weight - MIN_WEIGHT_KG).abs() < f64::EPSILON);
        assert!((line.length - MIN_DIMENSION_CM).abs() < f64::EPSILON);
        assert!((line.width - 5.0).abs() < f64::EPSILON);
        assert!((line.height - MIN_DIMENSION_CM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_units_are_converted_before_floors() {
        let package = ShippingPackage::new("01310100").with_item(item(50.0, 200.0, 5.0, 150.0));
        let request =
            QuoteRequest::from_package(&package, WeightUnit::G, DimensionUnit::Mm).unwrap();
        let line = &request.products[0];
        // 50 g is below the 100 g floor
        assert!((line.weight - MIN_WEIGHT_KG).abs() < f64::EPSILON);
        assert!((line.length - 20.0).abs() < 1e-9);
        // 5 mm is below the 1 cm floor
        assert!((line.width - MIN_DIMENSION_CM).abs() < f64::EPSILON);
        assert!((line.height - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_formatting_only_postal_code_is_rejected() {
        let package = ShippingPackage::new(" - ").with_item(item(1.0, 1.0, 1.0, 1.0));
        assert!(matches!(
            build(&package),
            Err(ValidationError::EmptyPostalCode(_))
        ));
    }

    #[test]
    fn test_no_shippable_items_is_rejected() {
        let mut virtual_item = item(1.0, 1.0, 1.0, 1.0);
        virtual_item.needs_shipping = false;
        let package = ShippingPackage::new("01310100").with_item(virtual_item);
        assert_eq!(build(&package), Err(ValidationError::NothingToShip));
        assert_eq!(
            build(&ShippingPackage::new("01310100")),
            Err(ValidationError::NothingToShip)
        );
    }

    #[test]
    fn test_blank_reference_is_omitted() {
        let mut line = item(1.0, 1.0, 1.0, 1.0);
        line.reference = Some("  ".to_string());
        let package = ShippingPackage::new("01310100").with_item(line);
        let body = build(&package).unwrap().to_json().unwrap();
        assert!(!body.contains("reference"));
    }

    #[test]
    fn test_cache_key_is_stable_per_normalized_content() {
        let a = ShippingPackage::new("01310-100").with_item(item(1.0, 10.0, 10.0, 10.0));
        let b = ShippingPackage::new("01310100").with_item(item(1.0, 10.0, 10.0, 10.0));
        let c = ShippingPackage::new("01310100").with_item(item(2.0, 10.0, 10.0, 10.0));

        let key = |p: &ShippingPackage| cache_key(&build(p).unwrap().to_json().unwrap());
        assert_eq!(key(&a), key(&b));
        assert_ne!(key(&a), key(&c));
        assert!(key(&a).starts_with(CACHE_KEY_PREFIX));
        assert_eq!(key(&a).len(), CACHE_KEY_PREFIX.len() + 64);
    }
}
