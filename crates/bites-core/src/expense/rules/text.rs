//! Text cleanup for vendor names and item descriptions.

use super::ValueNormalizer;
use super::patterns::WHITESPACE_RUN;
use crate::error::FieldError;

/// Legal-entity suffixes stripped from vendor names.
const LEGAL_SUFFIXES: [&str; 14] = [
    " S.A. DE C.V.",
    " S.A. DE C.V",
    " S.A DE C.V.",
    " S.A DE C.V",
    " S.A.",
    " S.A",
    " S.L.",
    " S.L",
    " INC.",
    " INC",
    " LLC.",
    " LLC",
    " LTD.",
    " LTD",
];

/// Vendor name normalizer.
#[derive(Default)]
pub struct VendorNameNormalizer;

impl ValueNormalizer for VendorNameNormalizer {
    type Output = String;

    fn normalize(&self, text: &str) -> Result<String, FieldError> {
        non_empty(clean_vendor_name(text), "vendor_name")
    }
}

/// Line item description normalizer.
#[derive(Default)]
pub struct DescriptionNormalizer;

impl ValueNormalizer for DescriptionNormalizer {
    type Output = String;

    fn normalize(&self, text: &str) -> Result<String, FieldError> {
        non_empty(clean_description(text), "description")
    }
}

fn non_empty(value: String, field: &str) -> Result<String, FieldError> {
    if value.is_empty() {
        Err(FieldError::EmptyValue {
            field: field.to_string(),
        })
    } else {
        Ok(value)
    }
}

/// Trim and collapse whitespace runs to a single space.
pub fn clean_description(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Trim and strip one trailing legal-entity suffix (longest match, ASCII case-insensitive).
pub fn clean_vendor_name(text: &str) -> String {
    let name = text.trim();

    let suffix_len = LEGAL_SUFFIXES
        .iter()
        .filter(|suffix| ends_with_ignore_case(name, suffix))
        .map(|suffix| suffix.len())
        .max();

    match suffix_len {
        Some(len) => name[..name.len() - len].trim().to_string(),
        None => name.to_string(),
    }
}

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    if name.len() < suffix.len() {
        return false;
    }
    let start = name.len() - suffix.len();
    name.is_char_boundary(start) && name[start..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_description() {
        assert_eq!(clean_description("  Cafe   con\tleche \n"), "Cafe con leche");
        assert_eq!(clean_description("Pan\u{00a0}\u{00a0}integral"), "Pan integral");
    }

    #[test]
    fn test_clean_vendor_suffixes() {
        assert_eq!(clean_vendor_name("  Grupo Bimbo S.A. DE C.V. "), "Grupo Bimbo");
        assert_eq!(clean_vendor_name("Mercadona S.A."), "Mercadona");
        assert_eq!(clean_vendor_name("Zara S.L"), "Zara");
        assert_eq!(clean_vendor_name("Acme Inc."), "Acme");
        assert_eq!(clean_vendor_name("Foo LLC"), "Foo");
        assert_eq!(clean_vendor_name("Bar Ltd."), "Bar");
    }

    #[test]
    fn test_clean_vendor_only_trailing() {
        assert_eq!(clean_vendor_name("INCA Kola"), "INCA Kola");
        assert_eq!(clean_vendor_name("S.A. Holdings"), "S.A. Holdings");
        assert_eq!(clean_vendor_name("Cafetería Inca"), "Cafetería Inca");
        assert_eq!(clean_vendor_name("Tienda Ñandú"), "Tienda Ñandú");
    }

    #[test]
    fn test_clean_vendor_strips_once() {
        assert_eq!(clean_vendor_name("Foo LLC INC"), "Foo LLC");
    }

    #[test]
    fn test_normalizers_reject_empty() {
        assert!(VendorNameNormalizer.normalize("   ").is_err());
        assert_eq!(
            DescriptionNormalizer.normalize(" \t"),
            Err(FieldError::EmptyValue {
                field: "description".to_string()
            })
        );
        assert_eq!(VendorNameNormalizer.normalize("Oxxo S.A."), Ok("Oxxo".to_string()));
    }
}
