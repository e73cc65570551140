//! Mappings from OCR provider output to [`RawOcrDocument`](crate::RawOcrDocument).
//!
//! Provider types stop here; the normalizer only sees
//! [`DetectedField`](crate::DetectedField).

pub mod textract;

pub use textract::AnalyzeExpenseOutput;
