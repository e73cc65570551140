//! Subcommands of the `bites` binary.

pub mod batch;
pub mod config;
pub mod normalize;
pub mod parse_path;

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, SecondsFormat};
use tracing::debug;

use bites_core::{BitesConfig, NormalizationConfig, Preset};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bites")
        .join("config.json")
}

/// Load the config file: the explicit path, else the default path when it exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BitesConfig> {
    if let Some(path) = config_path {
        return Ok(BitesConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(BitesConfig::from_file(&default_path)?)
    } else {
        Ok(BitesConfig::default())
    }
}

/// Resolve the normalization config from the file and command-line overrides.
///
/// `--preset` replaces whatever the file selects; `--min-confidence` keeps the
/// resolved languages, currencies and date order.
pub fn resolve_normalization(
    file: &BitesConfig,
    preset: Option<&str>,
    min_confidence: Option<f64>,
) -> anyhow::Result<NormalizationConfig> {
    let base = match preset {
        Some(name) => name.parse::<Preset>()?.config(),
        None => file.normalization_config()?,
    };

    let Some(min_confidence) = min_confidence else {
        return Ok(base);
    };

    let config = NormalizationConfig::custom(
        Some(base.languages().to_vec()),
        min_confidence,
        base.currency_codes().iter().cloned(),
    )?
    .with_date_order(base.date_order());

    Ok(config)
}

/// Render a transaction date the way the JSON output does (`Z` for UTC).
pub fn format_timestamp(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
