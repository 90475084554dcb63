//! # CLI Configuration
//!
//! Builds the [`EngineConfig`] the commands run with.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. EngineConfig::default()                                            │
//! │  2. TOML file: --config PATH, else the platform config dir             │
//! │       ~/.config/pricing/pricing.toml (Linux)                           │
//! │       ~/Library/Application Support/com.pricing.pricing/... (macOS)    │
//! │  3. Environment variables                                              │
//! │       PRICING_STATISTICAL_LEVY_RATE=0.01                               │
//! │       PRICING_TRADE_BLOC_COUNTRIES=SN,CI,ML                            │
//! │       PRICING_QUOTE_ROUNDING=integer                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The result is validated before any command sees it.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricing_core::{ConfigError as EngineConfigError, EngineConfig, RoundingMode};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Failure to produce a usable configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Explicit config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },

    #[error(transparent)]
    Engine(#[from] EngineConfigError),
}

/// Default config file location, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "pricing", "pricing")
        .map(|dirs| dirs.config_dir().join("pricing.toml"))
}

/// Loads configuration from file, environment and defaults.
///
/// An explicit `--config` path must exist; the default location is
/// optional.
pub fn load(explicit_path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let mut config = match explicit_path {
        Some(path) if !path.exists() => return Err(ConfigError::FileNotFound(path.to_path_buf())),
        Some(path) => read_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                EngineConfig::default()
            }
            None => EngineConfig::default(),
        },
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    config.validate()?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<EngineConfig, ConfigError> {
    info!(?path, "Loading engine config from file");
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&contents, path)
}

/// Parses a TOML document; missing keys keep their defaults.
pub fn parse_toml(contents: &str, path: &Path) -> Result<EngineConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// Applies `PRICING_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut EngineConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let rates: [(&str, &mut Decimal); 7] = [
        ("PRICING_STATISTICAL_LEVY_RATE", &mut config.statistical_levy_rate),
        ("PRICING_SOLIDARITY_LEVY_RATE", &mut config.solidarity_levy_rate),
        ("PRICING_COMMUNITY_LEVY_RATE", &mut config.community_levy_rate),
        ("PRICING_SHIPPING_LEVY_RATE", &mut config.shipping_levy_rate),
        ("PRICING_ADVANCE_TAX_RATE", &mut config.advance_tax_rate),
        ("PRICING_EUR_XOF_PEG", &mut config.eur_xof_peg),
        ("PRICING_QUOTE_TAX_RATE", &mut config.quote_tax_rate),
    ];
    for (name, slot) in rates {
        if let Some(raw) = lookup(name) {
            *slot = parse_value(name, &raw)?;
            debug!(name, value = %slot, "Overriding from environment");
        }
    }

    if let Some(raw) = lookup("PRICING_RATE_CONFIDENCE") {
        config.rate_confidence = parse_value("PRICING_RATE_CONFIDENCE", &raw)?;
    }

    if let Some(raw) = lookup("PRICING_TRADE_BLOC_COUNTRIES") {
        config.trade_bloc_countries = raw
            .split(',')
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        debug!(countries = ?config.trade_bloc_countries, "Overriding trade bloc from environment");
    }

    if let Some(raw) = lookup("PRICING_QUOTE_ROUNDING") {
        config.quote_rounding = RoundingMode::from_str(&raw)?;
    }

    Ok(())
}
