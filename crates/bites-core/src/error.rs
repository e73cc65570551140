//! Error types for the bites-core library.

use thiserror::Error;

/// Main error type for the bites library.
#[derive(Error, Debug)]
pub enum BitesError {
    /// Configuration could not be built.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A single field value could not be normalized.
    #[error("field error: {0}")]
    Field(#[from] FieldError),

    /// Storage path could not be split into bucket and key.
    #[error("invalid storage path: {0}")]
    StoragePath(#[from] StoragePathError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while building a [`NormalizationConfig`](crate::NormalizationConfig).
///
/// These are fatal to configuration construction and surface before any
/// document is processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Preset name is not one of the known presets.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Minimum confidence outside the closed range [0, 1].
    #[error("minimum confidence must be within [0, 1], got {0}")]
    ConfidenceOutOfRange(f64),

    /// Language list was given but is empty or contains blank codes.
    #[error("at least one language code is required")]
    NoLanguages,
}

/// Field-level normalization failures.
///
/// Always recoverable: the aggregator drops the single attribute and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Value could not be parsed as an amount.
    #[error("failed to parse amount: '{value}'")]
    InvalidAmount { value: String },

    /// Value matched none of the date templates.
    #[error("unable to parse date: '{value}'")]
    InvalidDate { value: String },

    /// Value was empty after cleanup.
    #[error("empty value for {field}")]
    EmptyValue { field: String },
}

/// Errors from splitting a `scheme://bucket/key` storage path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoragePathError {
    /// Path does not start with `<scheme>://`.
    #[error("path must start with <scheme>:// (got '{0}')")]
    MissingScheme(String),

    /// Scheme is present but not the expected one.
    #[error("unsupported scheme '{found}', expected '{expected}'")]
    UnsupportedScheme { expected: String, found: String },

    /// No bucket between the scheme and the first slash.
    #[error("missing bucket, expected <scheme>://bucket/key")]
    EmptyBucket,

    /// No object key after the bucket.
    #[error("missing object key, expected <scheme>://bucket/key")]
    EmptyKey,
}

/// Result type for the bites library.
pub type Result<T> = std::result::Result<T, BitesError>;
