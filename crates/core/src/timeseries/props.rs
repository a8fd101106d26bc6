//! Property-based tests for monthly bucketing.
//!
//! - Months strictly increase
//! - The last cumulative total equals the sum of every converted amount
//! - Each cumulative is the previous cumulative plus the period total

use chrono::NaiveDate;
use monchantier_shared::types::{ChantierId, CurrencyCode, Money, RecordId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::bucketer::TimeSeriesBucketer;
use crate::currency::{ExchangeRateTable, to_base};
use crate::records::{Expense, FinancialRecord};

fn rates() -> ExchangeRateTable {
    let code = |s: &str| CurrencyCode::parse(s).unwrap();
    ExchangeRateTable::new(code("TND"))
        .with_rate(code("EUR"), Decimal::new(335, 2))
        .unwrap()
}

/// Strategy for an expense dated within 2024-2026.
fn record() -> impl Strategy<Value = FinancialRecord> {
    (
        2024i32..=2026,
        1u32..=12,
        1u32..=28,
        (-500_000i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        prop_oneof![Just("TND"), Just("EUR")],
    )
        .prop_map(|(year, month, day, amount, currency)| -> FinancialRecord {
            Expense {
                id: RecordId::from("e"),
                date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
                amount: Money::new(amount, CurrencyCode::parse(currency).unwrap()),
                chantier_id: ChantierId::from("X"),
                category_id: None,
                payer: None,
            }
            .into()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_buckets_are_monotonic_and_complete(records in prop::collection::vec(record(), 0..50)) {
        let rates = rates();
        let buckets = TimeSeriesBucketer::bucket_by_month(&records, &rates).unwrap();

        for pair in buckets.windows(2) {
            prop_assert!(pair[0].month_key < pair[1].month_key);
            prop_assert_eq!(
                pair[1].cumulative_total_base,
                pair[0].cumulative_total_base + pair[1].period_total_base
            );
        }
        if let Some(first) = buckets.first() {
            prop_assert_eq!(first.cumulative_total_base, first.period_total_base);
        }

        let expected: Decimal = records.iter().map(|r| to_base(r.amount(), &rates).unwrap()).sum();
        let last = buckets.last().map_or(Decimal::ZERO, |b| b.cumulative_total_base);
        prop_assert_eq!(last, expected);

        let counted: usize = buckets.iter().map(|b| b.record_count).sum();
        prop_assert_eq!(counted, records.len());
    }

    /// Input order never changes the result.
    #[test]
    fn prop_order_independent(records in prop::collection::vec(record(), 0..30)) {
        let rates = rates();
        let forward = TimeSeriesBucketer::bucket_by_month(&records, &rates).unwrap();
        let backward = TimeSeriesBucketer::bucket_by_month(records.iter().rev(), &rates).unwrap();
        prop_assert_eq!(forward, backward);
    }
}
