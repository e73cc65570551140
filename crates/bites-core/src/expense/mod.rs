//! Expense document normalization.

pub mod classifier;
pub mod confidence;
mod normalizer;
pub mod rules;

pub use classifier::{classify, FieldScope, Role};
pub use confidence::accept;
pub use normalizer::ExpenseNormalizer;

use crate::models::config::NormalizationConfig;
use crate::models::document::{ParsedDocument, RawOcrDocument};

/// Normalize one document with the given config.
pub fn normalize(document: &RawOcrDocument, config: &NormalizationConfig) -> ParsedDocument {
    ExpenseNormalizer::new(config.clone()).normalize(document)
}

/// Normalize one document with [`NormalizationConfig::default`].
pub fn normalize_with_default_config(document: &RawOcrDocument) -> ParsedDocument {
    ExpenseNormalizer::default().normalize(document)
}
