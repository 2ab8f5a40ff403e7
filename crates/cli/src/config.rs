//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use domain::Money;
use pricing::{DiscountConfig, PricingConfig};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,

    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// CLI configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default: `text`)
/// - `DELIVERY_FEE`: flat delivery fee (default: `3`)
/// - `EXPRESS_FEE`: express delivery fee (default: `4`)
/// - `TAX_RATE`: tax rate in `[0, 1]` (default: `0.20`)
/// - `DISCOUNT_THRESHOLD`: subtotal that unlocks the discount (default: `20`)
/// - `DISCOUNT_PERCENT`: discount fraction in `[0, 1]` (default: `0.10`)
/// - `PRICING_CONFIG`: path to a JSON pipeline description; overrides the
///   individual fee settings when set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub delivery_fee: Money,
    pub express_fee: Money,
    pub tax_rate: Decimal,
    pub discount_threshold: Money,
    pub discount_percent: Decimal,
    pub pricing_config_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Missing keys take their default; present but malformed values fail.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let defaults = Self::default();

        let decimal = |key: &'static str, default: Decimal| -> Result<Decimal, CliError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => Decimal::from_str(value.trim())
                    .map_err(|_| CliError::InvalidConfig { key, value }),
            }
        };

        let log_level = lookup("RUST_LOG").unwrap_or(defaults.log_level);
        if EnvFilter::try_new(&log_level).is_err() {
            return Err(CliError::InvalidConfig {
                key: "RUST_LOG",
                value: log_level,
            });
        }

        let log_format = match lookup("LOG_FORMAT") {
            None => defaults.log_format,
            Some(value) => value
                .parse::<LogFormat>()
                .map_err(|()| CliError::InvalidConfig {
                    key: "LOG_FORMAT",
                    value,
                })?,
        };

        Ok(Self {
            log_level,
            log_format,
            delivery_fee: Money::new(decimal("DELIVERY_FEE", defaults.delivery_fee.amount())?),
            express_fee: Money::new(decimal("EXPRESS_FEE", defaults.express_fee.amount())?),
            tax_rate: decimal("TAX_RATE", defaults.tax_rate)?,
            discount_threshold: Money::new(decimal(
                "DISCOUNT_THRESHOLD",
                defaults.discount_threshold.amount(),
            )?),
            discount_percent: decimal("DISCOUNT_PERCENT", defaults.discount_percent)?,
            pricing_config_path: lookup("PRICING_CONFIG").map(PathBuf::from),
        })
    }

    /// Returns the pipeline description to price orders with.
    pub fn pricing_config(&self) -> Result<PricingConfig, CliError> {
        match &self.pricing_config_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(serde_json::from_str(&raw)?)
            }
            None => Ok(PricingConfig::standard(
                self.delivery_fee,
                self.express_fee,
                self.tax_rate,
                DiscountConfig::ThresholdPercent {
                    threshold: self.discount_threshold,
                    percent: self.discount_percent,
                },
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            delivery_fee: Money::from_units(3),
            express_fee: Money::from_units(4),
            tax_rate: Decimal::new(20, 2),
            discount_threshold: Money::from_units(20),
            discount_percent: Decimal::new(10, 2),
            pricing_config_path: None,
        }
    }
}
