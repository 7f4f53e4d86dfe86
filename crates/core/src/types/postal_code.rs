//! Destination postal code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PostalCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeError {
    /// The input has no digits at all (empty, or only formatting characters).
    #[error("postal code has no digits")]
    Empty,
}

/// A normalized destination postal code.
///
/// Only the digits of the input are kept, so `"01310-100"`, `"01310 100"` and
/// `"01310100"` all normalize to the same value.
///
/// ## Examples
///
/// ```
/// use envios_core::PostalCode;
///
/// assert_eq!(PostalCode::parse("01310-100").unwrap().as_str(), "01310100");
/// assert!(PostalCode::parse(" - ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse a `PostalCode`, stripping every non-digit character.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeError::Empty`] if no digits remain.
    pub fn parse(s: &str) -> Result<Self, PostalCodeError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        if digits.is_empty() {
            return Err(PostalCodeError::Empty);
        }

        Ok(Self(digits))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = PostalCodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_formatting() {
        assert_eq!(PostalCode::parse("01310-100").unwrap().as_str(), "01310100");
        assert_eq!(PostalCode::parse(" 01310 100 ").unwrap().as_str(), "01310100");
        assert_eq!(PostalCode::parse("CEP: 20040.002").unwrap().as_str(), "20040002");
    }

    #[test]
    fn test_parse_only_formatting_is_empty() {
        assert_eq!(PostalCode::parse(""), Err(PostalCodeError::Empty));
        assert_eq!(PostalCode::parse("-"), Err(PostalCodeError::Empty));
        assert_eq!(PostalCode::parse("  - . "), Err(PostalCodeError::Empty));
    }

    #[test]
    fn test_non_ascii_digits_are_dropped() {
        // Arabic-Indic digits are not ASCII digits
        assert_eq!(PostalCode::parse("١٢٣"), Err(PostalCodeError::Empty));
    }

    #[test]
    fn test_serializes_as_string() {
        let code = PostalCode::parse("01310-100").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"01310100\"");
    }

    #[test]
    fn test_deserialize_normalizes_and_validates() {
        let code: PostalCode = serde_json::from_str("\"01310-100\"").unwrap();
        assert_eq!(code.as_str(), "01310100");

        assert!(serde_json::from_str::<PostalCode>("\" - \"").is_err());
        assert!(serde_json::from_str::<PostalCode>("\"\"").is_err());
    }
}
