//! Confidence gate for detected fields.

use crate::models::config::NormalizationConfig;
use crate::models::document::DetectedField;

/// Accept a field when it carries no confidence, or when its confidence meets
/// the configured minimum.
pub fn accept(field: &DetectedField, config: &NormalizationConfig) -> bool {
    meets_threshold(field.confidence, config.min_confidence())
}

/// Threshold check on a raw confidence value. Missing confidence is trusted.
pub fn meets_threshold(confidence: Option<f64>, min_confidence: f64) -> bool {
    match confidence {
        None => true,
        Some(value) => value >= min_confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::Preset;

    #[test]
    fn test_missing_confidence_is_trusted() {
        let strict = Preset::HighAccuracy.config();
        assert!(accept(&DetectedField::new("12,50"), &strict));
    }

    #[test]
    fn test_threshold_is_enforced() {
        let config = Preset::Default.config();
        assert!(accept(&DetectedField::new("a").with_confidence(0.7), &config));
        assert!(accept(&DetectedField::new("a").with_confidence(0.99), &config));
        assert!(!accept(&DetectedField::new("a").with_confidence(0.69), &config));
    }

    #[test]
    fn test_threshold_depends_on_preset() {
        let field = DetectedField::new("a").with_confidence(0.5);
        assert!(accept(&field, &Preset::LowConfidence.config()));
        assert!(!accept(&field, &Preset::HighAccuracy.config()));
    }

    #[test]
    fn test_nan_confidence_is_rejected() {
        assert!(!meets_threshold(Some(f64::NAN), 0.0));
    }
}
