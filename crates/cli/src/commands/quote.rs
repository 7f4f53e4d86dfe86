//! Quote a package from the command line.
//!
//! # Usage
//!
//! ```bash
//! envios quote package.json --debug
//! ```
//!
//! The file holds a `ShippingPackage`:
//!
//! ```json
//! {
//!   "destination_postal_code": "01310-100",
//!   "items": [
//!     { "unit_price": 49.9, "quantity": 2, "weight": 1.5,
//!       "length": 20, "width": 15, "height": 10 }
//!   ]
//! }
//! ```
//!
//! Unlike checkout, errors are reported instead of becoming an empty list.

use std::path::Path;

use envios_core::{ShippingPackage, ShippingRateOffer};
use envios_freight::{FreightConfig, QuoteAdapter};

use super::CliError;

/// Quote the package in `path` and print the offers as JSON.
pub async fn run(path: &Path, debug: bool) -> Result<(), CliError> {
    let mut config = FreightConfig::from_env()?;
    config.debug |= debug;

    let package = load_package(path)?;
    tracing::info!(
        items = package.items.len(),
        shippable = package.shippable_items().count(),
        "Quoting package"
    );

    let adapter = QuoteAdapter::new(config)?;
    let offers = adapter.quote(&package).await?;

    tracing::info!(offers = offers.len(), "Quote complete");
    print_offers(&offers)
}

fn load_package(path: &Path) -> Result<ShippingPackage, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_package(&contents)
}

fn parse_package(contents: &str) -> Result<ShippingPackage, CliError> {
    Ok(serde_json::from_str(contents)?)
}

#[allow(clippy::print_stdout)]
fn print_offers(offers: &[ShippingRateOffer]) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(offers)?);
    Ok(())
}
