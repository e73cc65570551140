//! Document aggregator turning a raw OCR analysis into a normalized bill.

use tracing::{debug, info};

use crate::error::FieldError;
use crate::models::config::NormalizationConfig;
use crate::models::document::{DetectedField, ParsedDocument, ParsedLineItem, RawLineItem, RawOcrDocument};

use super::classifier::{classify, FieldScope, Role};
use super::confidence::accept;
use super::rules::{AmountNormalizer, DateNormalizer, DescriptionNormalizer, ValueNormalizer, VendorNameNormalizer};

/// Normalizer for OCR expense documents.
///
/// Holds one validated config; reusable across documents and safe to share
/// between threads.
pub struct ExpenseNormalizer {
    config: NormalizationConfig,
    amounts: AmountNormalizer,
    dates: DateNormalizer,
}

impl ExpenseNormalizer {
    /// Create a normalizer for the given config.
    pub fn new(config: NormalizationConfig) -> Self {
        Self {
            amounts: AmountNormalizer::new(config.currency_codes().clone()),
            dates: DateNormalizer::new(config.date_order()),
            config,
        }
    }

    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Normalize one document.
    ///
    /// Never fails: fields that are rejected, unclassifiable or unparsable are
    /// dropped one by one and the rest of the document is still used.
    pub fn normalize(&self, document: &RawOcrDocument) -> ParsedDocument {
        if document.is_empty() {
            debug!("Empty document, nothing to normalize");
            return ParsedDocument::default();
        }

        let mut parsed = ParsedDocument::default();
        let mut trace = String::new();

        for field in &document.summary_fields {
            if !accept(field, &self.config) {
                debug!(
                    "Skipping summary field {:?} below confidence {:.2}",
                    field.type_code, self.config.min_confidence()
                );
                continue;
            }

            if let Some(label) = &field.label_text {
                trace.push_str(label);
                trace.push_str(": ");
            }
            trace.push_str(&field.value_text);
            trace.push('\n');

            self.apply_summary_field(field, &mut parsed);
        }

        for group in &document.line_item_groups {
            for item in &group.line_items {
                if let Some((line_item, segment)) = self.normalize_line_item(item) {
                    if !segment.is_empty() {
                        trace.push_str(&segment.join(", "));
                        trace.push('\n');
                    }
                    parsed.line_items.push(line_item);
                }
            }
        }

        parsed.raw_text_output = trace.trim().to_string();

        info!(
            "Normalized document ({}): vendor={}, date={}, total={}, {}/{} line items kept",
            self.config.primary_language(),
            parsed.vendor_name.is_some(),
            parsed.transaction_date.is_some(),
            parsed.total_amount.is_some(),
            parsed.line_items.len(),
            document.line_item_count()
        );

        parsed
    }

    /// Apply a summary field; later fields of the same role overwrite earlier ones.
    fn apply_summary_field(&self, field: &DetectedField, parsed: &mut ParsedDocument) {
        let value = field.value_text.as_str();

        match classify(field, FieldScope::Summary) {
            Role::Vendor => {
                if let Some(name) = keep(VendorNameNormalizer.normalize(value), Role::Vendor) {
                    parsed.vendor_name = Some(name);
                }
            }
            Role::Date => {
                if let Some(date) = keep(self.dates.normalize(value), Role::Date) {
                    parsed.transaction_date = Some(date);
                }
            }
            Role::Total => {
                if let Some(total) = keep(self.amounts.normalize(value), Role::Total) {
                    parsed.total_amount = Some(total);
                }
            }
            _ => {}
        }
    }

    /// Normalize one line item, returning it with its trace segment when kept.
    fn normalize_line_item(&self, item: &RawLineItem) -> Option<(ParsedLineItem, Vec<String>)> {
        let mut line = ParsedLineItem::default();
        let mut segment = Vec::new();
        let mut has_valid_field = false;

        for field in &item.fields {
            if !accept(field, &self.config) {
                debug!("Skipping line item field {:?} below confidence", field.type_code);
                continue;
            }

            if let Some(key) = field.type_code.as_deref().or(field.label_text.as_deref()) {
                segment.push(format!("{}: {}", key, field.value_text));
            }

            let value = field.value_text.as_str();
            match classify(field, FieldScope::LineItem) {
                Role::Description => {
                    if let Some(description) = keep(DescriptionNormalizer.normalize(value), Role::Description) {
                        line.description = description;
                        has_valid_field = true;
                    }
                }
                Role::Quantity => {
                    if let Some(quantity) = keep(self.amounts.normalize(value), Role::Quantity) {
                        line.quantity = Some(quantity);
                        has_valid_field = true;
                    }
                }
                Role::UnitPrice => {
                    if let Some(price) = keep(self.amounts.normalize(value), Role::UnitPrice) {
                        line.unit_price = Some(price);
                        has_valid_field = true;
                    }
                }
                Role::LineTotal => {
                    if let Some(total) = keep(self.amounts.normalize(value), Role::LineTotal) {
                        line.total_price = Some(total);
                        has_valid_field = true;
                    }
                }
                _ => {}
            }
        }

        if has_valid_field && !line.description.is_empty() {
            Some((line, segment))
        } else {
            debug!("Dropping line item without description or valid fields");
            None
        }
    }
}

impl Default for ExpenseNormalizer {
    fn default() -> Self {
        Self::new(NormalizationConfig::default())
    }
}

fn keep<T>(result: Result<T, FieldError>, role: Role) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Dropping {:?} field: {}", role, e);
            None
        }
    }
}
