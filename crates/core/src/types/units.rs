//! Store measurement units.
//!
//! Cart items carry weights and dimensions in whatever units the store is
//! configured with. The freight API always expects kilograms and centimeters.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a unit name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// Unknown weight unit.
    #[error("unknown weight unit: {0} (expected kg, g, lbs or oz)")]
    UnknownWeight(String),
    /// Unknown dimension unit.
    #[error("unknown dimension unit: {0} (expected cm, m, mm, in or yd)")]
    UnknownDimension(String),
}

/// Unit used by the store for product weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    G,
    Lbs,
    Oz,
}

impl WeightUnit {
    /// Convert a weight in this unit to kilograms.
    #[must_use]
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Self::Kg => value,
            Self::G => value * 0.001,
            Self::Lbs => value * 0.453_592_37,
            Self::Oz => value * 0.028_349_523_125,
        }
    }

    /// Canonical unit name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::G => "g",
            Self::Lbs => "lbs",
            Self::Oz => "oz",
        }
    }
}

impl FromStr for WeightUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(Self::Kg),
            "g" => Ok(Self::G),
            "lbs" | "lb" => Ok(Self::Lbs),
            "oz" => Ok(Self::Oz),
            other => Err(UnitError::UnknownWeight(other.to_string())),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit used by the store for product dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    #[default]
    Cm,
    M,
    Mm,
    In,
    Yd,
}

impl DimensionUnit {
    /// Convert a length in this unit to centimeters.
    #[must_use]
    pub fn to_cm(self, value: f64) -> f64 {
        match self {
            Self::Cm => value,
            Self::M => value * 100.0,
            Self::Mm => value * 0.1,
            Self::In => value * 2.54,
            Self::Yd => value * 91.44,
        }
    }

    /// Canonical unit name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cm => "cm",
            Self::M => "m",
            Self::Mm => "mm",
            Self::In => "in",
            Self::Yd => "yd",
        }
    }
}

impl FromStr for DimensionUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" => Ok(Self::Cm),
            "m" => Ok(Self::M),
            "mm" => Ok(Self::Mm),
            "in" => Ok(Self::In),
            "yd" => Ok(Self::Yd),
            other => Err(UnitError::UnknownDimension(other.to_string())),
        }
    }
}

impl fmt::Display for DimensionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
