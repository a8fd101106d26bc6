//! Property-based tests for currency operations.
//!
//! - Conversion round-trip through the base currency
//! - Percentage shares always total 100

use monchantier_shared::types::{CurrencyCode, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{from_base, to_base};
use super::rates::ExchangeRateTable;
use super::share::ShareUtil;

/// Strategy to generate signed decimal amounts (-1,000,000.00 to 1,000,000.00).
fn signed_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to pick one of the table's currencies.
fn currency() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("TND"), Just("EUR"), Just("USD")]
}

fn table(eur: Decimal, usd: Decimal) -> ExchangeRateTable {
    let code = |s: &str| CurrencyCode::parse(s).unwrap();
    ExchangeRateTable::new(code("TND"))
        .with_rate(code("EUR"), eur)
        .unwrap()
        .with_rate(code("USD"), usd)
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Converting to base and back into the same currency recovers the value.
    #[test]
    fn prop_round_trip_recovers_value(
        value in signed_amount(),
        eur in positive_rate(),
        usd in positive_rate(),
        code in currency(),
    ) {
        let rates = table(eur, usd);
        let currency = CurrencyCode::parse(code).unwrap();
        let amount = Money::new(value, currency.clone());

        let base = to_base(&amount, &rates).unwrap();
        let back = from_base(base, &currency, &rates).unwrap();

        let tolerance = Decimal::new(1, 9) * value.abs().max(Decimal::ONE);
        prop_assert!(
            (back - value).abs() <= tolerance,
            "round trip drifted: {} -> {} -> {}",
            value, base, back
        );
    }

    /// Conversion is deterministic.
    #[test]
    fn prop_to_base_is_deterministic(
        value in signed_amount(),
        eur in positive_rate(),
    ) {
        let rates = table(eur, Decimal::ONE);
        let amount = Money::new(value, CurrencyCode::parse("EUR").unwrap());
        prop_assert_eq!(to_base(&amount, &rates), to_base(&amount, &rates));
    }

    /// Non-negative weights with a positive total always yield shares summing to 100.
    #[test]
    fn prop_shares_sum_to_hundred(
        weights in prop::collection::vec((1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 3)), 1..20),
        decimal_places in 0u32..=4,
    ) {
        let shares = ShareUtil::percent_shares(&weights, decimal_places).unwrap();
        prop_assert_eq!(shares.len(), weights.len());
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), Decimal::ONE_HUNDRED);
    }
}
