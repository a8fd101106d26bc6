//! Currency conversion through the base currency.
//!
//! Aggregation converts every amount into the base currency with
//! [`to_base`] and never rounds. Display amounts are produced once, at the
//! presentation boundary, with [`from_base`] followed by [`round_display`].

use monchantier_shared::types::{CurrencyCode, Money};
use rust_decimal::{Decimal, RoundingStrategy};

use super::rates::ExchangeRateTable;
use crate::error::{AggregationError, AggregationResult};

/// Converts `amount` into base-currency units.
///
/// # Errors
///
/// Returns `UnknownCurrency` if the table has no rate for `amount.currency`.
pub fn to_base(amount: &Money, rates: &ExchangeRateTable) -> AggregationResult<Decimal> {
    let rate = rates
        .rate(&amount.currency)
        .ok_or_else(|| AggregationError::UnknownCurrency(amount.currency.clone()))?;
    amount
        .amount
        .checked_mul(rate)
        .ok_or(AggregationError::Overflow("base conversion"))
}

/// Converts a base-currency value into `target` units.
///
/// # Errors
///
/// Returns `DivisionByZero` if `target` has no rate or a zero rate.
pub fn from_base(
    value_base: Decimal,
    target: &CurrencyCode,
    rates: &ExchangeRateTable,
) -> AggregationResult<Decimal> {
    match rates.rate(target) {
        Some(rate) if !rate.is_zero() => value_base
            .checked_div(rate)
            .ok_or(AggregationError::Overflow("display conversion")),
        _ => Err(AggregationError::DivisionByZero(target.clone())),
    }
}

/// Adds two base amounts.
///
/// # Errors
///
/// Returns `Overflow(what)` if the sum leaves the `Decimal` range.
pub fn checked_sum(lhs: Decimal, rhs: Decimal, what: &'static str) -> AggregationResult<Decimal> {
    lhs.checked_add(rhs).ok_or(AggregationError::Overflow(what))
}

/// Subtracts two base amounts.
///
/// # Errors
///
/// Returns `Overflow(what)` if the difference leaves the `Decimal` range.
pub fn checked_diff(lhs: Decimal, rhs: Decimal, what: &'static str) -> AggregationResult<Decimal> {
    lhs.checked_sub(rhs).ok_or(AggregationError::Overflow(what))
}

/// Rounds a display amount with banker's rounding (round half to even).
#[must_use]
pub fn round_display(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn rates() -> ExchangeRateTable {
        ExchangeRateTable::new(code("TND"))
            .with_rate(code("EUR"), dec!(3.35))
            .unwrap()
            .with_rate(code("USD"), dec!(3.10))
            .unwrap()
    }

    #[test]
    fn test_to_base() {
        // 100 EUR * 3.35 = 335 TND
        let amount = Money::new(dec!(100), code("EUR"));
        assert_eq!(to_base(&amount, &rates()).unwrap(), dec!(335.00));
    }

    #[test]
    fn test_to_base_identity_for_base_currency() {
        let amount = Money::new(dec!(42.125), code("TND"));
        assert_eq!(to_base(&amount, &rates()).unwrap(), dec!(42.125));
    }

    #[test]
    fn test_to_base_negative_passes_through() {
        let amount = Money::new(dec!(-10), code("USD"));
        assert_eq!(to_base(&amount, &rates()).unwrap(), dec!(-31.00));
    }

    #[test]
    fn test_to_base_unknown_currency() {
        let amount = Money::new(dec!(10), code("GBP"));
        assert_eq!(
            to_base(&amount, &rates()),
            Err(AggregationError::UnknownCurrency(code("GBP")))
        );
    }

    #[test]
    fn test_to_base_overflow_is_reported() {
        let amount = Money::new(Decimal::MAX, code("EUR"));
        assert_eq!(
            to_base(&amount, &rates()),
            Err(AggregationError::Overflow("base conversion"))
        );
    }

    #[test]
    fn test_from_base_overflow_is_reported() {
        let tiny = ExchangeRateTable::new(code("TND"))
            .with_rate(code("XAU"), dec!(0.0001))
            .unwrap();
        assert_eq!(
            from_base(Decimal::MAX, &code("XAU"), &tiny),
            Err(AggregationError::Overflow("display conversion"))
        );
    }

    #[test]
    fn test_checked_sum_and_diff() {
        assert_eq!(checked_sum(dec!(1.5), dec!(2), "total"), Ok(dec!(3.5)));
        assert_eq!(
            checked_sum(Decimal::MAX, Decimal::ONE, "total"),
            Err(AggregationError::Overflow("total"))
        );
        assert_eq!(
            checked_diff(Decimal::MIN, Decimal::ONE, "balance"),
            Err(AggregationError::Overflow("balance"))
        );
    }

    #[test]
    fn test_from_base() {
        assert_eq!(from_base(dec!(310), &code("USD"), &rates()).unwrap(), dec!(100));
        assert_eq!(from_base(dec!(310), &code("TND"), &rates()).unwrap(), dec!(310));
    }

    #[test]
    fn test_from_base_missing_rate() {
        assert_eq!(
            from_base(dec!(310), &code("GBP"), &rates()),
            Err(AggregationError::DivisionByZero(code("GBP")))
        );
    }

    #[test]
    fn test_round_display_bankers() {
        assert_eq!(round_display(dec!(2.5), 0), dec!(2));
        assert_eq!(round_display(dec!(3.5), 0), dec!(4));
        assert_eq!(round_display(dec!(1.0005), 3), dec!(1.000));
        assert_eq!(round_display(dec!(1.0015), 3), dec!(1.002));
    }
}
