//! Exchange rate record keyed by currency code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name used when the currency directory has no entry for a code.
pub const UNKNOWN_CURRENCY_NAME: &str = "-";

/// A currency with its display name and its rate against the base currency.
///
/// `code` is the unique key in every store. Records are replaced wholesale on
/// update; callers never patch a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub code: String,
    pub name: String,
    pub rate: f64,
}

impl CurrencyRate {
    pub fn new(code: impl Into<String>, name: impl Into<String>, rate: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            rate,
        }
    }

    /// Creates a record for a code the directory does not know about.
    pub fn unnamed(code: impl Into<String>, rate: f64) -> Self {
        Self::new(code, UNKNOWN_CURRENCY_NAME, rate)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns true when the record carries a usable (positive, finite) rate.
    pub fn has_usable_rate(&self) -> bool {
        self.rate.is_finite() && self.rate > 0.0
    }
}

impl fmt::Display for CurrencyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.code, self.name, self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unnamed_uses_placeholder() {
        let rate = CurrencyRate::unnamed("XYZ", 1.5);
        assert_eq!(rate.name, "-");
        assert_eq!(rate.code(), "XYZ");
    }

    #[test]
    fn test_usable_rate() {
        assert!(CurrencyRate::new("EUR", "Euro", 0.9).has_usable_rate());
        assert!(!CurrencyRate::new("EUR", "Euro", 0.0).has_usable_rate());
        assert!(!CurrencyRate::new("EUR", "Euro", f64::NAN).has_usable_rate());
    }

    #[test]
    fn test_display() {
        let rate = CurrencyRate::new("JPY", "Japanese Yen", 149.5);
        assert_eq!(rate.to_string(), "JPY (Japanese Yen) 149.5");
    }
}
