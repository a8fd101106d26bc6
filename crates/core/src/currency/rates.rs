//! Exchange rate table.

use std::collections::BTreeMap;

use monchantier_shared::config::CurrencyConfig;
use monchantier_shared::types::CurrencyCode;
use monchantier_shared::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AggregationError, AggregationResult};

/// Mapping from currency to its value in base-currency units.
///
/// Always contains `base -> 1`. Every other rate is strictly positive.
/// Edits go through [`ExchangeRateTable::set_rate`]; an aggregation pass
/// only ever borrows the table immutably.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRateTable", into = "RawRateTable")]
pub struct ExchangeRateTable {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, Decimal>,
}

/// Wire shape of the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRateTable {
    base: CurrencyCode,
    #[serde(default)]
    rates: BTreeMap<CurrencyCode, Decimal>,
}

impl ExchangeRateTable {
    /// Creates a table holding only the base identity entry.
    #[must_use]
    pub fn new(base: CurrencyCode) -> Self {
        let rates = BTreeMap::from([(base.clone(), Decimal::ONE)]);
        Self { base, rates }
    }

    /// Builder-style [`set_rate`](Self::set_rate).
    ///
    /// # Errors
    ///
    /// Same as `set_rate`.
    pub fn with_rate(mut self, currency: CurrencyCode, rate: Decimal) -> AggregationResult<Self> {
        self.set_rate(currency, rate)?;
        Ok(self)
    }

    /// Sets the value of one unit of `currency` in base units.
    ///
    /// # Errors
    ///
    /// - `InvalidRate` if `rate <= 0`.
    /// - `BaseRateFixed` if `currency` is the base and `rate != 1`.
    pub fn set_rate(&mut self, currency: CurrencyCode, rate: Decimal) -> AggregationResult<()> {
        if rate <= Decimal::ZERO {
            return Err(AggregationError::InvalidRate { currency, rate });
        }
        if currency == self.base {
            if rate != Decimal::ONE {
                return Err(AggregationError::BaseRateFixed(currency));
            }
            return Ok(());
        }
        self.rates.insert(currency, rate);
        Ok(())
    }

    /// Returns the rate-to-base of `currency`, if known.
    #[must_use]
    pub fn rate(&self, currency: &CurrencyCode) -> Option<Decimal> {
        self.rates.get(currency).copied()
    }

    /// Returns the base currency.
    #[must_use]
    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Returns true if `currency` has an entry.
    #[must_use]
    pub fn contains(&self, currency: &CurrencyCode) -> bool {
        self.rates.contains_key(currency)
    }

    /// Iterates over all known currencies in code order.
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.rates.keys()
    }

    /// Builds the table from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for malformed codes or invalid rates.
    pub fn from_config(config: &CurrencyConfig) -> AppResult<Self> {
        let mut table = Self::new(config.base_currency()?);
        for (currency, rate) in config.parsed_rates()? {
            table.set_rate(currency, rate).map_err(AppError::from)?;
        }
        Ok(table)
    }
}

impl TryFrom<RawRateTable> for ExchangeRateTable {
    type Error = AggregationError;

    fn try_from(raw: RawRateTable) -> Result<Self, Self::Error> {
        let mut table = Self::new(raw.base);
        for (currency, rate) in raw.rates {
            table.set_rate(currency, rate)?;
        }
        Ok(table)
    }
}

impl From<ExchangeRateTable> for RawRateTable {
    fn from(table: ExchangeRateTable) -> Self {
        Self {
            base: table.base,
            rates: table.rates,
        }
    }
}
