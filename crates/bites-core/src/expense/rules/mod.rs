//! Value normalizers for detected bill fields.

pub mod amounts;
pub mod dates;
pub mod patterns;
pub mod text;

pub use amounts::{parse_amount, AmountNormalizer, CURRENCY_CODES, CURRENCY_SYMBOLS};
pub use dates::{normalize_month_names, parse_date, parse_date_with_order, DateNormalizer};
pub use text::{clean_description, clean_vendor_name, DescriptionNormalizer, VendorNameNormalizer};

use crate::error::FieldError;

/// Trait for single-value normalizers.
pub trait ValueNormalizer {
    /// The type of value this normalizer produces.
    type Output;

    /// Normalize one detected value.
    fn normalize(&self, text: &str) -> Result<Self::Output, FieldError>;
}
