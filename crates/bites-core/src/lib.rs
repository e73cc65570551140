//! Core library for expense document normalization.
//!
//! This crate provides:
//! - Normalization configs and named presets
//! - Field classification from provider type codes and localized labels
//! - Amount, date, vendor and description normalizers
//! - The document aggregator producing a [`ParsedDocument`]
//! - AWS Textract `AnalyzeExpense` mapping
//! - Storage path splitting (`s3://bucket/key`)

pub mod error;
pub mod expense;
pub mod models;
pub mod provider;
pub mod storage;

pub use error::{BitesError, ConfigError, FieldError, Result, StoragePathError};
pub use expense::{normalize, normalize_with_default_config, ExpenseNormalizer};
pub use models::config::{BitesConfig, DateOrder, NormalizationConfig, OutputConfig, Preset};
pub use models::document::{
    DetectedField, LineItemGroup, ParsedDocument, ParsedLineItem, RawLineItem, RawOcrDocument,
};
pub use provider::AnalyzeExpenseOutput;
pub use storage::StorageLocation;
