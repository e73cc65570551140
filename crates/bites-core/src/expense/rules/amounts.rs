//! Amount parsing for bill totals and line prices.

use std::collections::BTreeSet;

use tracing::debug;

use super::ValueNormalizer;
use crate::error::FieldError;

/// Currency symbols removed before parsing.
pub const CURRENCY_SYMBOLS: [&str; 10] = ["$", "€", "£", "¥", "₱", "₦", "₹", "₪", "₩", "₨"];

/// ISO currency codes removed before parsing.
pub const CURRENCY_CODES: [&str; 10] = [
    "USD", "EUR", "GBP", "JPY", "PHP", "NGN", "INR", "ILS", "KRW", "PKR",
];

/// Amount normalizer bound to a currency vocabulary.
pub struct AmountNormalizer {
    currency_codes: BTreeSet<String>,
}

impl AmountNormalizer {
    pub fn new(currency_codes: BTreeSet<String>) -> Self {
        Self { currency_codes }
    }
}

impl Default for AmountNormalizer {
    fn default() -> Self {
        Self::new(BTreeSet::new())
    }
}

impl ValueNormalizer for AmountNormalizer {
    type Output = f64;

    fn normalize(&self, text: &str) -> Result<f64, FieldError> {
        parse_amount(text, &self.currency_codes)
    }
}

/// Parse an amount such as `"$1,234.56"`, `"1,50"` or `"1 234,56 €"`.
///
/// Symbols from [`CURRENCY_SYMBOLS`] and codes from [`CURRENCY_CODES`] are
/// stripped. `currency_codes` is the configured vocabulary; it is only used
/// for diagnostics and never changes what gets stripped.
///
/// Separator rules:
/// - both `,` and `.` present: commas are thousands separators;
/// - only `,`: a single comma followed by at most two digits is the decimal
///   point, otherwise commas are thousands separators;
/// - otherwise the text is left as is.
pub fn parse_amount(text: &str, currency_codes: &BTreeSet<String>) -> Result<f64, FieldError> {
    let mut s = text.to_string();
    for token in CURRENCY_SYMBOLS.iter().chain(CURRENCY_CODES.iter()) {
        s = s.replace(token, "");
    }

    let normalized = normalize_separators(s.trim());

    // Spaces left inside the number are digit grouping
    let cleaned: String = normalized
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            if let Some(code) = currency_codes.iter().find(|c| text.contains(c.as_str())) {
                debug!("Amount '{}' carries currency code {} which is not stripped", text, code);
            }
            Err(FieldError::InvalidAmount {
                value: text.to_string(),
            })
        }
    }
}

fn normalize_separators(s: &str) -> String {
    let has_comma = s.contains(',');
    let has_dot = s.contains('.');

    if has_comma && has_dot {
        s.replace(',', "")
    } else if has_comma {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() == 2 && parts[1].trim().len() <= 2 {
            s.replace(',', ".")
        } else {
            s.replace(',', "")
        }
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn amount(text: &str) -> Result<f64, FieldError> {
        parse_amount(text, &BTreeSet::new())
    }

    #[test]
    fn test_comma_thousands_dot_decimal() {
        assert_eq!(amount("1,234.56"), Ok(1234.56));
        assert_eq!(amount("12,345,678.90"), Ok(12345678.90));
    }

    #[test]
    fn test_comma_as_decimal() {
        assert_eq!(amount("1,50"), Ok(1.5));
        assert_eq!(amount("12,5"), Ok(12.5));
        assert_eq!(amount("1 234,56"), Ok(1234.56));
    }

    #[test]
    fn test_comma_as_thousands() {
        assert_eq!(amount("1,500"), Ok(1500.0));
        assert_eq!(amount("1,500,000"), Ok(1500000.0));
    }

    #[test]
    fn test_currency_symbols_and_codes() {
        assert_eq!(amount("$1,234.56"), Ok(1234.56));
        assert_eq!(amount("12,50 €"), Ok(12.5));
        assert_eq!(amount("USD 45.00"), Ok(45.0));
        assert_eq!(amount("£ 3.99"), Ok(3.99));
        assert_eq!(amount("₹250"), Ok(250.0));
    }

    #[test]
    fn test_both_separators_treat_comma_as_thousands() {
        // European "1.234,56" is read with the comma as grouping
        assert_eq!(amount("1.234,56"), Ok(1.23456));
    }

    #[test]
    fn test_configured_codes_do_not_change_stripping() {
        let codes: BTreeSet<String> = ["COP".to_string()].into_iter().collect();
        assert!(parse_amount("COP 1500", &codes).is_err());
        assert_eq!(parse_amount("USD 1500", &codes), Ok(1500.0));
    }

    #[test]
    fn test_invalid_amounts() {
        assert_eq!(
            amount("abc"),
            Err(FieldError::InvalidAmount {
                value: "abc".to_string()
            })
        );
        assert!(amount("").is_err());
        assert!(amount("inf").is_err());
        assert!(amount("NaN").is_err());
    }

    #[test]
    fn test_normalizer_trait() {
        let normalizer = AmountNormalizer::default();
        assert_eq!(normalizer.normalize(" 7,25 "), Ok(7.25));
    }
}
