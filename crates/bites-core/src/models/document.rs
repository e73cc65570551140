//! OCR input and normalized bill output models.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One key/value detection reported by the OCR provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedField {
    /// Provider-normalized semantic tag (e.g. `VENDOR_NAME`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,

    /// Label as printed on the bill, in any supported locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_text: Option<String>,

    /// Detected value text.
    pub value_text: String,

    /// Detection confidence (0.0 - 1.0), when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl DetectedField {
    pub fn new(value_text: impl Into<String>) -> Self {
        Self {
            value_text: value_text.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, type_code: impl Into<String>) -> Self {
        self.type_code = Some(type_code.into());
        self
    }

    pub fn with_label(mut self, label_text: impl Into<String>) -> Self {
        self.label_text = Some(label_text.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// A single line item as a bag of detections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLineItem {
    pub fields: Vec<DetectedField>,
}

/// A table of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemGroup {
    pub line_items: Vec<RawLineItem>,
}

/// Provider-independent OCR analysis of one bill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOcrDocument {
    /// Document-level detections, in provider order.
    #[serde(default)]
    pub summary_fields: Vec<DetectedField>,

    /// Line-item tables.
    #[serde(default)]
    pub line_item_groups: Vec<LineItemGroup>,
}

impl RawOcrDocument {
    /// True when there is nothing to normalize.
    pub fn is_empty(&self) -> bool {
        self.summary_fields.is_empty()
            && self
                .line_item_groups
                .iter()
                .all(|g| g.line_items.iter().all(|i| i.fields.is_empty()))
    }

    /// Number of line items across all groups.
    pub fn line_item_count(&self) -> usize {
        self.line_item_groups.iter().map(|g| g.line_items.len()).sum()
    }
}

/// A normalized line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedLineItem {
    /// Item description, never empty in a [`ParsedDocument`].
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
}

impl ParsedLineItem {
    /// Best available line amount: explicit total, else quantity times unit price,
    /// else the unit price alone.
    pub fn amount(&self) -> Option<f64> {
        self.total_price.or(match (self.quantity, self.unit_price) {
            (Some(q), Some(p)) => Some(q * p),
            (None, Some(p)) => Some(p),
            _ => None,
        })
    }
}

/// Normalized bill produced by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    /// Transaction date; date-only values sit at midnight UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,

    #[serde(default)]
    pub line_items: Vec<ParsedLineItem>,

    /// Accepted label/value pairs, one per line.
    #[serde(default)]
    pub raw_text_output: String,
}

impl ParsedDocument {
    /// Consistency warnings. An empty list means nothing looked off.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.vendor_name.is_none() {
            issues.push("Missing vendor name".to_string());
        }

        if self.transaction_date.is_none() {
            issues.push("Missing transaction date".to_string());
        }

        if self.total_amount.is_none() {
            issues.push("Missing total amount".to_string());
        }

        if self.line_items.is_empty() {
            issues.push("No line items".to_string());
        }

        // Only compare when every item carries an amount
        let amounts: Option<Vec<f64>> = self.line_items.iter().map(ParsedLineItem::amount).collect();
        if let (Some(total), Some(amounts)) = (self.total_amount, amounts) {
            if !amounts.is_empty() {
                let calculated: f64 = amounts.iter().sum();
                if (calculated - total).abs() > 0.01 {
                    issues.push(format!(
                        "Line item total ({:.2}) differs from document total ({:.2})",
                        calculated, total
                    ));
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn item(description: &str, total: Option<f64>) -> ParsedLineItem {
        ParsedLineItem {
            description: description.to_string(),
            total_price: total,
            ..Default::default()
        }
    }

    #[test]
    fn test_line_item_amount_fallbacks() {
        let explicit = ParsedLineItem {
            description: "Cafe".to_string(),
            quantity: Some(2.0),
            unit_price: Some(1.5),
            total_price: Some(3.2),
        };
        assert_eq!(explicit.amount(), Some(3.2));

        let computed = ParsedLineItem {
            total_price: None,
            ..explicit.clone()
        };
        assert_eq!(computed.amount(), Some(3.0));

        let unit_only = ParsedLineItem {
            quantity: None,
            ..computed
        };
        assert_eq!(unit_only.amount(), Some(1.5));

        assert_eq!(item("Pan", None).amount(), None);
    }

    #[test]
    fn test_issues_on_empty_document() {
        let issues = ParsedDocument::default().issues();
        assert_eq!(
            issues,
            vec![
                "Missing vendor name".to_string(),
                "Missing transaction date".to_string(),
                "Missing total amount".to_string(),
                "No line items".to_string(),
            ]
        );
    }

    #[test]
    fn test_issues_total_mismatch() {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 15, 0, 0, 0)
            .unwrap();
        let mut doc = ParsedDocument {
            vendor_name: Some("Tienda".to_string()),
            transaction_date: Some(date),
            total_amount: Some(10.0),
            line_items: vec![item("A", Some(4.0)), item("B", Some(6.0))],
            raw_text_output: String::new(),
        };
        assert!(doc.issues().is_empty());

        doc.total_amount = Some(12.0);
        assert_eq!(
            doc.issues(),
            vec!["Line item total (10.00) differs from document total (12.00)".to_string()]
        );

        // An item without an amount disables the comparison
        doc.line_items.push(item("C", None));
        assert!(doc.issues().is_empty());
    }

    #[test]
    fn test_raw_document_is_empty() {
        assert!(RawOcrDocument::default().is_empty());

        let doc = RawOcrDocument {
            summary_fields: vec![],
            line_item_groups: vec![LineItemGroup {
                line_items: vec![RawLineItem::default()],
            }],
        };
        assert!(doc.is_empty());
        assert_eq!(doc.line_item_count(), 1);
    }

    #[test]
    fn test_detected_field_builder() {
        let field = DetectedField::new("12,50")
            .with_type("TOTAL")
            .with_label("Total")
            .with_confidence(0.93);
        assert_eq!(field.type_code.as_deref(), Some("TOTAL"));
        assert_eq!(field.label_text.as_deref(), Some("Total"));
        assert_eq!(field.value_text, "12,50");
        assert_eq!(field.confidence, Some(0.93));
    }
}
