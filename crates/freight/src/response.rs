//! Freight quote response parsing.
//!
//! The freight API answers with `{"quotes": [...]}`. The array is parsed
//! leniently: entries that are not objects, or that have no usable
//! `total_cost`, are dropped without discarding the rest.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QuoteError;

/// A carrier quote returned by the freight API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Carrier identifier, e.g. `correios-sedex`.
    pub carrier_slug: Option<String>,
    /// Carrier name, e.g. `Correios`.
    pub carrier_name: Option<String>,
    /// Name to show the customer.
    pub display_name: Option<String>,
    /// Total shipping cost.
    pub total_cost: Decimal,
    /// Delivery time in business days (0 when not provided).
    pub delivery_time: u32,
}

/// Parse a freight API response body into its valid quotes.
///
/// # Errors
///
/// Returns [`QuoteError::MalformedResponse`] if the body is not JSON or has
/// no `quotes` array.
pub fn parse_quotes(body: &str) -> Result<Vec<Quote>, QuoteError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| QuoteError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let entries = value
        .get("quotes")
        .and_then(Value::as_array)
        .ok_or_else(|| QuoteError::MalformedResponse("missing `quotes` array".to_string()))?;

    let quotes = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| quote_from_value(index, entry))
        .collect();

    Ok(quotes)
}

/// Why a `total_cost` could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CostError {
    /// Not a number or numeric string.
    NotNumeric,
    /// A valid number that does not fit in a `Decimal`.
    OutOfRange,
}

fn quote_from_value(index: usize, entry: &Value) -> Option<Quote> {
    let Some(object) = entry.as_object() else {
        tracing::debug!(index, "Skipping quote that is not an object");
        return None;
    };

    let total_cost = match object.get("total_cost") {
        None | Some(Value::Null) => {
            tracing::debug!(index, "Skipping quote without total_cost");
            return None;
        }
        Some(value) => match decimal_from_value(value) {
            Ok(cost) => cost,
            Err(CostError::OutOfRange) => {
                tracing::warn!(
                    index,
                    total_cost = %value,
                    "Skipping quote with out-of-range total_cost"
                );
                return None;
            }
            Err(CostError::NotNumeric) => {
                tracing::debug!(
                    index,
                    total_cost = %value,
                    "Skipping quote with non-numeric total_cost"
                );
                return None;
            }
        },
    };

    Some(Quote {
        carrier_slug: object.get("carrier_slug").and_then(non_empty_string),
        carrier_name: object.get("carrier_name").and_then(non_empty_string),
        display_name: object.get("display_name").and_then(non_empty_string),
        total_cost,
        delivery_time: object
            .get("delivery_time")
            .and_then(days_from_value)
            .unwrap_or(0),
    })
}

/// Read a decimal from a JSON number or numeric string.
///
/// Goes through the number's textual form so `19.9` stays exactly `19.9`.
fn decimal_from_value(value: &Value) -> Result<Decimal, CostError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(CostError::NotNumeric),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| {
            let is_number =
                text.parse::<f64>().is_ok() && text.bytes().any(|b| b.is_ascii_digit());
            if is_number {
                CostError::OutOfRange
            } else {
                CostError::NotNumeric
            }
        })
}

/// Read a non-negative day count from a JSON number or numeric string.
// finite and non-negative is checked first
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn days_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
            .and_then(|d| u32::try_from(d).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
