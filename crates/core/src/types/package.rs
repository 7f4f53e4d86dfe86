//! Cart package types.
//!
//! A [`ShippingPackage`] is what checkout hands over when it needs rates: the
//! cart lines being shipped together plus where they are going. Weights and
//! dimensions are in the store's configured units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product reference (usually the store product ID).
    #[serde(default)]
    pub reference: Option<String>,
    /// Price of a single unit.
    pub unit_price: Decimal,
    /// Number of units in the cart.
    pub quantity: u32,
    /// Weight of a single unit, in store weight units.
    #[serde(default)]
    pub weight: f64,
    /// Length of a single unit, in store dimension units.
    #[serde(default)]
    pub length: f64,
    /// Width of a single unit, in store dimension units.
    #[serde(default)]
    pub width: f64,
    /// Height of a single unit, in store dimension units.
    #[serde(default)]
    pub height: f64,
    /// `false` for virtual or downloadable products.
    #[serde(default = "default_needs_shipping")]
    pub needs_shipping: bool,
}

const fn default_needs_shipping() -> bool {
    true
}

impl LineItem {
    /// Whether this line contributes anything physical to the shipment.
    #[must_use]
    pub const fn is_shippable(&self) -> bool {
        self.needs_shipping && self.quantity > 0
    }
}

/// Cart lines plus destination.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShippingPackage {
    /// Cart lines, in cart order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Destination postal code as typed by the customer.
    #[serde(default)]
    pub destination_postal_code: String,
}

impl ShippingPackage {
    /// Create a package for a destination with no items.
    #[must_use]
    pub fn new(destination_postal_code: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            destination_postal_code: destination_postal_code.into(),
        }
    }

    /// Append a line item.
    #[must_use]
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Iterate over the lines that actually need shipping, in cart order.
    pub fn shippable_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| item.is_shippable())
    }

    /// Whether at least one line needs shipping.
    #[must_use]
    pub fn needs_shipping(&self) -> bool {
        self.shippable_items().next().is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(quantity: u32, needs_shipping: bool) -> LineItem {
        LineItem {
            reference: Some("42".to_string()),
            unit_price: Decimal::new(1990, 2),
            quantity,
            weight: 1.0,
            length: 10.0,
            width: 10.0,
            height: 10.0,
            needs_shipping,
        }
    }

    #[test]
    fn test_empty_package_needs_no_shipping() {
        assert!(!ShippingPackage::new("01310100").needs_shipping());
    }

    #[test]
    fn test_virtual_and_zero_quantity_items_are_not_shippable() {
        let package = ShippingPackage::new("01310100")
            .with_item(item(1, false))
            .with_item(item(0, true));
        assert!(!package.needs_shipping());
        assert_eq!(package.shippable_items().count(), 0);
    }

    #[test]
    fn test_shippable_items_keep_cart_order() {
        let mut first = item(1, true);
        first.reference = Some("a".to_string());
        let mut second = item(2, true);
        second.reference = Some("b".to_string());

        let package = ShippingPackage::new("01310100")
            .with_item(first)
            .with_item(item(1, false))
            .with_item(second);

        let refs: Vec<_> = package
            .shippable_items()
            .map(|i| i.reference.clone().unwrap())
            .collect();
        assert_eq!(refs, vec!["a", "b"]);
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "destination_postal_code": "01310-100",
            "items": [{"unit_price": 10.5, "quantity": 2}]
        }"#;
        let package: ShippingPackage = serde_json::from_str(json).unwrap();
        let line = &package.items[0];
        assert!(line.needs_shipping);
        assert_eq!(line.reference, None);
        assert_eq!(line.unit_price, Decimal::new(105, 1));
        assert!(line.weight.abs() < f64::EPSILON);
    }
}
