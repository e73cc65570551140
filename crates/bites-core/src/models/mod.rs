//! Data models: configuration, OCR input, normalized output.

pub mod config;
pub mod document;
