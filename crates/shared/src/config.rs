//! Application configuration management.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::CurrencyCode;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Currency and exchange rate configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Aggregate cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Report driver configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Currency configuration.
///
/// Rates are expressed as units of the base currency per one unit of the
/// keyed currency (1 EUR = 3.35 TND).
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Base (accounting) currency.
    #[serde(default = "default_base")]
    pub base: String,
    /// Display currency; falls back to the base currency.
    #[serde(default)]
    pub display: Option<String>,
    /// Decimal places used when rounding display amounts.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Rate-to-base for each non-base currency.
    #[serde(default = "default_rates")]
    pub rates: BTreeMap<String, Decimal>,
}

fn default_base() -> String {
    "TND".to_string()
}

fn default_decimal_places() -> u32 {
    3 // millimes
}

fn default_rates() -> BTreeMap<String, Decimal> {
    BTreeMap::from([
        ("EUR".to_string(), Decimal::new(335, 2)),
        ("USD".to_string(), Decimal::new(310, 2)),
    ])
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            display: None,
            decimal_places: default_decimal_places(),
            rates: default_rates(),
        }
    }
}

impl CurrencyConfig {
    /// Returns the parsed base currency.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the code is malformed.
    pub fn base_currency(&self) -> AppResult<CurrencyCode> {
        CurrencyCode::parse(&self.base).map_err(AppError::Config)
    }

    /// Returns the parsed display currency (base when unset).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the code is malformed.
    pub fn display_currency(&self) -> AppResult<CurrencyCode> {
        match &self.display {
            Some(code) => CurrencyCode::parse(code).map_err(AppError::Config),
            None => self.base_currency(),
        }
    }

    /// Returns the configured rates with parsed, upper-cased currency codes.
    ///
    /// Environment and file sources may lower-case map keys, so keys are
    /// normalized here.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for a malformed code.
    pub fn parsed_rates(&self) -> AppResult<Vec<(CurrencyCode, Decimal)>> {
        self.rates
            .iter()
            .map(|(code, rate)| {
                CurrencyCode::parse(code)
                    .map(|code| (code, *rate))
                    .map_err(AppError::Config)
            })
            .collect()
    }
}

/// Aggregate cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached dashboard summaries.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live of a cached summary in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_max_capacity() -> u64 {
    100
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Report driver configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Path to the JSON data snapshot.
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MONCHANTIER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.currency.base, "TND");
        assert_eq!(config.currency.decimal_places, 3);
        assert_eq!(config.currency.rates.get("EUR"), Some(&dec!(3.35)));
        assert_eq!(config.currency.rates.get("USD"), Some(&dec!(3.10)));
        assert_eq!(config.cache.max_capacity, 100);
        assert_eq!(config.cache.ttl_secs, 300);
        assert!(config.report.snapshot_path.is_none());
    }

    #[test]
    fn test_display_falls_back_to_base() {
        let config = CurrencyConfig::default();
        assert_eq!(config.display_currency().unwrap().as_str(), "TND");

        let config = CurrencyConfig {
            display: Some("eur".to_string()),
            ..CurrencyConfig::default()
        };
        assert_eq!(config.display_currency().unwrap().as_str(), "EUR");
    }

    #[test]
    fn test_parsed_rates_normalizes_keys() {
        let config = CurrencyConfig {
            rates: BTreeMap::from([("eur".to_string(), dec!(3.35))]),
            ..CurrencyConfig::default()
        };
        let rates = config.parsed_rates().unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].0.as_str(), "EUR");
        assert_eq!(rates[0].1, dec!(3.35));
    }

    #[test]
    fn test_malformed_code_is_config_error() {
        let config = CurrencyConfig {
            base: "DINAR".to_string(),
            ..CurrencyConfig::default()
        };
        let err = config.base_currency().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let source = r#"
            [currency]
            display = "USD"

            [currency.rates]
            EUR = "3.40"
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.currency.base, "TND");
        assert_eq!(config.currency.display.as_deref(), Some("USD"));
        let rates = config.currency.parsed_rates().unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].0.as_str(), "EUR");
        assert_eq!(rates[0].1, dec!(3.40));
        assert_eq!(config.cache.ttl_secs, 300);
    }
}
