//! Configuration structures for bill normalization.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Languages used when a custom config does not name any.
pub const DEFAULT_LANGUAGES: [&str; 2] = ["es", "en"];

/// Which numeric date family is tried first for slash/dash dates.
///
/// `03/04/2024` is the 4th of March under [`DateOrder::MonthFirst`] and the
/// 3rd of April under [`DateOrder::DayFirst`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `MM/DD/YYYY` before `DD/MM/YYYY`.
    #[default]
    MonthFirst,
    /// `DD/MM/YYYY` before `MM/DD/YYYY`.
    DayFirst,
}

impl DateOrder {
    /// Date order customary for a language code.
    pub fn for_language(code: &str) -> Self {
        if code.eq_ignore_ascii_case("en") {
            DateOrder::MonthFirst
        } else {
            DateOrder::DayFirst
        }
    }
}

/// Options for one normalization run.
///
/// Immutable once built; construct through [`Preset::config`] or
/// [`NormalizationConfig::custom`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNormalizationConfig")]
pub struct NormalizationConfig {
    /// Locale codes in preference order, first is primary.
    languages: Vec<String>,

    /// Minimum field confidence (0.0 - 1.0).
    min_confidence: f64,

    /// Currency vocabulary. Metadata only; the amount parser strips a fixed table.
    currency_codes: BTreeSet<String>,

    /// Precedence of the numeric date families.
    date_order: DateOrder,
}

impl NormalizationConfig {
    /// Build a validated config.
    ///
    /// `languages` of `None` falls back to [`DEFAULT_LANGUAGES`]; an empty list
    /// or a blank code is rejected. `min_confidence` must lie in `[0, 1]`.
    pub fn custom<I, S>(
        languages: Option<Vec<String>>,
        min_confidence: f64,
        currency_codes: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(ConfigError::ConfidenceOutOfRange(min_confidence));
        }

        let languages = match languages {
            None => DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            Some(list) => {
                let cleaned: Vec<String> = list
                    .iter()
                    .map(|l| l.trim().to_lowercase())
                    .collect();
                if cleaned.is_empty() || cleaned.iter().any(|l| l.is_empty()) {
                    return Err(ConfigError::NoLanguages);
                }
                cleaned
            }
        };

        Ok(Self::from_parts(languages, min_confidence, currency_codes))
    }

    fn from_parts<I, S>(languages: Vec<String>, min_confidence: f64, currency_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let date_order = languages
            .first()
            .map(|l| DateOrder::for_language(l))
            .unwrap_or_default();

        Self {
            languages,
            min_confidence,
            currency_codes: currency_codes
                .into_iter()
                .map(|c| c.into().trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .collect(),
            date_order,
        }
    }

    /// Override the date family precedence.
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Primary locale code.
    pub fn primary_language(&self) -> &str {
        self.languages.first().map(String::as_str).unwrap_or("es")
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn currency_codes(&self) -> &BTreeSet<String> {
        &self.currency_codes
    }

    pub fn date_order(&self) -> DateOrder {
        self.date_order
    }
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Preset::Default.config()
    }
}

/// Serialized form, validated on the way in.
#[derive(Deserialize)]
struct RawNormalizationConfig {
    #[serde(default)]
    languages: Option<Vec<String>>,
    min_confidence: f64,
    #[serde(default)]
    currency_codes: Vec<String>,
    #[serde(default)]
    date_order: Option<DateOrder>,
}

impl TryFrom<RawNormalizationConfig> for NormalizationConfig {
    type Error = ConfigError;

    fn try_from(raw: RawNormalizationConfig) -> Result<Self, Self::Error> {
        let config = NormalizationConfig::custom(raw.languages, raw.min_confidence, raw.currency_codes)?;
        Ok(match raw.date_order {
            Some(order) => config.with_date_order(order),
            None => config,
        })
    }
}

/// Named, pre-built configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Spanish first, English fallback.
    Default,
    /// Spanish only, relaxed threshold.
    SpanishOptimized,
    /// Strict threshold for documents where accuracy matters.
    HighAccuracy,
    /// Permissive threshold for poor scans.
    LowConfidence,
    EnglishOptimized,
    FrenchOptimized,
    GermanOptimized,
    PortugueseOptimized,
    ItalianOptimized,
    /// Latin American Spanish bills.
    LatinAmerican,
    /// Mixed European languages.
    European,
}

const LATAM_AND_MAJORS: [&str; 8] = ["EUR", "USD", "MXN", "ARS", "CLP", "COP", "PEN", "UYU"];

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Preset; 11] = [
        Preset::Default,
        Preset::SpanishOptimized,
        Preset::HighAccuracy,
        Preset::LowConfidence,
        Preset::EnglishOptimized,
        Preset::FrenchOptimized,
        Preset::GermanOptimized,
        Preset::PortugueseOptimized,
        Preset::ItalianOptimized,
        Preset::LatinAmerican,
        Preset::European,
    ];

    /// Kebab-case name used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::SpanishOptimized => "spanish-optimized",
            Preset::HighAccuracy => "high-accuracy",
            Preset::LowConfidence => "low-confidence",
            Preset::EnglishOptimized => "english-optimized",
            Preset::FrenchOptimized => "french-optimized",
            Preset::GermanOptimized => "german-optimized",
            Preset::PortugueseOptimized => "portuguese-optimized",
            Preset::ItalianOptimized => "italian-optimized",
            Preset::LatinAmerican => "latin-american",
            Preset::European => "european",
        }
    }

    /// Build the config for this preset.
    pub fn config(&self) -> NormalizationConfig {
        match self {
            Preset::Default => preset_config(&["es", "en"], 0.7, &["COP", "USD"]),
            Preset::SpanishOptimized => preset_config(&["es"], 0.6, &LATAM_AND_MAJORS),
            Preset::HighAccuracy => preset_config(&["es", "en"], 0.85, &LATAM_AND_MAJORS),
            Preset::LowConfidence => preset_config(&["es", "en"], 0.4, &LATAM_AND_MAJORS),
            Preset::EnglishOptimized => {
                preset_config(&["en"], 0.7, &["USD", "EUR", "GBP", "CAD", "AUD", "JPY"])
            }
            Preset::FrenchOptimized => preset_config(&["fr"], 0.6, &["EUR", "USD", "CAD", "CHF", "GBP"]),
            Preset::GermanOptimized => preset_config(&["de"], 0.6, &["EUR", "USD", "CHF", "GBP"]),
            Preset::PortugueseOptimized => {
                preset_config(&["pt"], 0.6, &["EUR", "USD", "BRL", "MZN", "AOA"])
            }
            Preset::ItalianOptimized => preset_config(&["it"], 0.6, &["EUR", "USD", "CHF", "GBP"]),
            Preset::LatinAmerican => preset_config(
                &["es"],
                0.5,
                &["MXN", "ARS", "CLP", "COP", "PEN", "UYU", "BRL", "USD", "EUR"],
            ),
            // English leads the list, but continental receipts write the day first.
            Preset::European => preset_config(
                &["en", "es", "fr", "de", "it", "pt"],
                0.6,
                &["EUR", "USD", "GBP", "CHF", "SEK", "NOK", "DKK"],
            )
            .with_date_order(DateOrder::DayFirst),
        }
    }
}

fn preset_config(languages: &[&str], min_confidence: f64, currencies: &[&str]) -> NormalizationConfig {
    NormalizationConfig::from_parts(
        languages.iter().map(|l| l.to_string()).collect(),
        min_confidence,
        currencies.iter().copied(),
    )
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration file for the `bites` tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BitesConfig {
    /// Preset to start from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Explicit normalization options; wins over `preset`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization: Option<NormalizationConfig>,

    /// Output formatting.
    pub output: OutputConfig,
}

/// Output formatting options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl BitesConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the effective normalization config: explicit, then preset, then default.
    pub fn normalization_config(&self) -> Result<NormalizationConfig, ConfigError> {
        if let Some(config) = &self.normalization {
            return Ok(config.clone());
        }
        match &self.preset {
            Some(name) => Ok(name.parse::<Preset>()?.config()),
            None => Ok(NormalizationConfig::default()),
        }
    }
}
