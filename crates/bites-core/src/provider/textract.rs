//! AWS Textract `AnalyzeExpense` response mapping.
//!
//! Only the parts used for normalization are modeled; geometry, blocks and
//! page metadata are ignored on deserialization.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::document::{DetectedField, LineItemGroup, RawLineItem, RawOcrDocument};

/// Top-level `AnalyzeExpense` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalyzeExpenseOutput {
    #[serde(default)]
    pub expense_documents: Vec<ExpenseDocument>,
}

/// One expense (receipt or invoice) found in the analyzed file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpenseDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_index: Option<u32>,
    #[serde(default)]
    pub summary_fields: Vec<ExpenseField>,
    #[serde(default)]
    pub line_item_groups: Vec<ExpenseLineItemGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpenseLineItemGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_item_group_index: Option<u32>,
    #[serde(default)]
    pub line_items: Vec<ExpenseLineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpenseLineItem {
    #[serde(default)]
    pub line_item_expense_fields: Vec<ExpenseField>,
}

/// A key/value pair detected by Textract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpenseField {
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<ExpenseDetection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_detection: Option<ExpenseDetection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_detection: Option<ExpenseDetection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

/// Text with a confidence on Textract's 0-100 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpenseDetection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl AnalyzeExpenseOutput {
    /// Parse a response serialized as JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Flatten all expense documents, in order, into one raw document.
    pub fn to_document(&self) -> RawOcrDocument {
        let mut document = RawOcrDocument::default();

        for expense in &self.expense_documents {
            document
                .summary_fields
                .extend(expense.summary_fields.iter().filter_map(ExpenseField::to_detected));

            for group in &expense.line_item_groups {
                let line_items = group
                    .line_items
                    .iter()
                    .map(|item| RawLineItem {
                        fields: item
                            .line_item_expense_fields
                            .iter()
                            .filter_map(ExpenseField::to_detected)
                            .collect(),
                    })
                    .collect();
                document.line_item_groups.push(LineItemGroup { line_items });
            }
        }

        debug!(
            "Mapped {} expense documents: {} summary fields, {} line items",
            self.expense_documents.len(),
            document.summary_fields.len(),
            document.line_item_count()
        );

        document
    }
}

impl From<AnalyzeExpenseOutput> for RawOcrDocument {
    fn from(output: AnalyzeExpenseOutput) -> Self {
        output.to_document()
    }
}

impl ExpenseField {
    /// Convert to a [`DetectedField`]. Fields without value text yield `None`.
    ///
    /// Confidence is taken from the value detection, falling back to the
    /// type detection, and rescaled to `[0, 1]`.
    pub fn to_detected(&self) -> Option<DetectedField> {
        let value = self.value_detection.as_ref()?;
        let text = value.text.as_ref()?;

        let confidence = value
            .confidence
            .or_else(|| self.field_type.as_ref().and_then(|t| t.confidence))
            .map(|c| c / 100.0);

        Some(DetectedField {
            type_code: self.field_type.as_ref().and_then(|t| t.text.clone()),
            label_text: self.label_detection.as_ref().and_then(|l| l.text.clone()),
            value_text: text.clone(),
            confidence,
        })
    }
}
