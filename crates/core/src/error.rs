//! Aggregation error types.

use monchantier_shared::AppError;
use monchantier_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that abort an aggregation pass or reject a rate table edit.
///
/// Unresolved entity labels and empty inputs are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// A record carries a currency with no entry in the rate table.
    #[error("Unknown currency: {0} has no exchange rate")]
    UnknownCurrency(CurrencyCode),

    /// Converting to a currency whose rate is zero or missing.
    #[error("Division by zero: no usable rate to convert into {0}")]
    DivisionByZero(CurrencyCode),

    /// A sum or product left the representable `Decimal` range.
    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),

    /// A rate table edit supplied a rate that is not strictly positive.
    #[error("Invalid rate for {currency}: {rate} (must be greater than zero)")]
    InvalidRate {
        /// Currency being edited.
        currency: CurrencyCode,
        /// Rejected rate.
        rate: Decimal,
    },

    /// A rate table edit tried to move the base currency off 1.
    #[error("Base currency {0} always has rate 1")]
    BaseRateFixed(CurrencyCode),
}

/// Result type alias using `AggregationError`.
pub type AggregationResult<T> = Result<T, AggregationError>;

impl From<AggregationError> for AppError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::InvalidRate { .. } | AggregationError::BaseRateFixed(_) => {
                Self::Config(err.to_string())
            }
            AggregationError::UnknownCurrency(_)
            | AggregationError::DivisionByZero(_)
            | AggregationError::Overflow(_) => Self::Aggregation(err.to_string()),
        }
    }
}
