//! Semantic role classification for detected fields.
//!
//! Summary fields go through two tiers: provider type codes first, then
//! locale keyword matching on the printed label. The keyword tier only runs
//! when the type code is missing or unrecognized. Line item fields are
//! classified by type code alone.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::document::DetectedField;

/// Meaning assigned to a detected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Vendor,
    Date,
    Total,
    Description,
    Quantity,
    UnitPrice,
    LineTotal,
    /// Not used for structured extraction.
    Unknown,
}

/// Where a field was found. The same type code means different things per scope
/// (`TOTAL` is the document total in the summary and the unit price in a line item).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    Summary,
    LineItem,
}

/// Keyword sets for one locale, matched as substrings of the upper-cased label.
pub struct LocaleKeywords {
    pub locale: &'static str,
    pub vendor: &'static [&'static str],
    pub date: &'static [&'static str],
    pub total: &'static [&'static str],
}

/// Label keywords per locale. English labels are covered by the type codes.
pub const LABEL_KEYWORDS: &[LocaleKeywords] = &[LocaleKeywords {
    locale: "es",
    vendor: &["VENDEDOR", "PROVEEDOR", "COMERCIO", "TIENDA", "RESTAURANTE", "SUPERMERCADO"],
    date: &["FECHA", "DÍA", "DIA", "FACTURA", "RECIBO"],
    total: &["TOTAL", "SUBTOTAL", "IMPORTE", "CANTIDAD", "MONTO"],
}];

const SUMMARY_TYPES: &[(Role, &[&str])] = &[
    (Role::Vendor, &["VENDOR_NAME", "MERCHANT_NAME", "STORE_NAME"]),
    (Role::Date, &["INVOICE_RECEIPT_DATE", "EXPENSE_DATE", "DATE"]),
    (Role::Total, &["TOTAL", "INVOICE_TOTAL", "AMOUNT_DUE"]),
];

const LINE_ITEM_TYPES: &[(Role, &[&str])] = &[
    (Role::Description, &["ITEM", "PRODUCT_CODE", "DESCRIPTION"]),
    (Role::Quantity, &["QUANTITY", "CANTIDAD"]),
    (Role::UnitPrice, &["PRICE", "UNIT_PRICE", "TOTAL", "PRECIO_UNITARIO"]),
    (Role::LineTotal, &["TOTAL_PRICE", "LINE_ITEM_TOTAL", "PRECIO_TOTAL", "VALOR_TOTAL"]),
];

/// Classify a field found in the given scope.
pub fn classify(field: &DetectedField, scope: FieldScope) -> Role {
    match scope {
        FieldScope::Summary => classify_summary(field),
        FieldScope::LineItem => classify_line_item(field),
    }
}

/// Classify a document-level field: type code tier, then label keyword tier.
pub fn classify_summary(field: &DetectedField) -> Role {
    if let Some(role) = field
        .type_code
        .as_deref()
        .and_then(|code| match_type_code(code, SUMMARY_TYPES))
    {
        return role;
    }

    field
        .label_text
        .as_deref()
        .and_then(match_label_keywords)
        .unwrap_or(Role::Unknown)
}

/// Classify a line item field by type code.
pub fn classify_line_item(field: &DetectedField) -> Role {
    field
        .type_code
        .as_deref()
        .and_then(|code| match_type_code(code, LINE_ITEM_TYPES))
        .unwrap_or(Role::Unknown)
}

fn match_type_code(code: &str, table: &[(Role, &[&str])]) -> Option<Role> {
    let code = code.trim().to_uppercase();
    table
        .iter()
        .find(|(_, codes)| codes.contains(&code.as_str()))
        .map(|(role, _)| *role)
}

fn match_label_keywords(label: &str) -> Option<Role> {
    let label = label.to_uppercase();
    let hit = |keywords: &[&str]| keywords.iter().any(|k| label.contains(k));

    // Role order is fixed across locales: vendor, date, total
    let roles: [(Role, fn(&LocaleKeywords) -> &'static [&'static str]); 3] = [
        (Role::Vendor, |l| l.vendor),
        (Role::Date, |l| l.date),
        (Role::Total, |l| l.total),
    ];

    for (role, keywords) in roles {
        if let Some(locale) = LABEL_KEYWORDS.iter().find(|l| hit(keywords(l))) {
            trace!("Label '{}' matched {:?} keywords for locale {}", label, role, locale.locale);
            return Some(role);
        }
    }
    None
}
