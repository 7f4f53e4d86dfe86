//! Delivery-time labels.
//!
//! Offers show the carrier name followed by the estimated delivery time in
//! business days, pluralized for the active locale.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Locale`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale: {0} (expected pt-BR or en)")]
pub struct LocaleError(pub String);

/// Locale used for customer-facing labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Brazilian Portuguese ("dia útil" / "dias úteis").
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// English ("business day" / "business days").
    #[serde(rename = "en")]
    En,
}

impl Locale {
    /// Singular and plural forms of "business day".
    #[must_use]
    pub const fn business_day_forms(self) -> (&'static str, &'static str) {
        match self {
            Self::PtBr => ("dia útil", "dias úteis"),
            Self::En => ("business day", "business days"),
        }
    }

    /// BCP 47 tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Self::PtBr),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(LocaleError(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a delivery time, e.g. `"2 dias úteis"` or `"1 business day"`.
#[must_use]
pub fn format_delivery_time(days: u32, locale: Locale) -> String {
    let (singular, plural) = locale.business_day_forms();
    let noun = if days == 1 { singular } else { plural };
    format!("{days} {noun}")
}

/// Append the delivery-time suffix to a label.
///
/// Returns the label unchanged when `days` is zero or when the suffix is
/// already present, so it can be applied any number of times.
#[must_use]
pub fn with_delivery_time(label: &str, days: u32, locale: Locale) -> String {
    if days == 0 {
        return label.to_string();
    }

    let suffix = format!(" ({})", format_delivery_time(days, locale));
    if label.ends_with(&suffix) {
        return label.to_string();
    }

    format!("{label}{suffix}")
}
