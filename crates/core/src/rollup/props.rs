//! Property-based tests for rollups.
//!
//! - Completeness: no record is lost or double-counted across groups
//! - Uniqueness: one rollup per distinct key

use std::collections::HashSet;

use chrono::NaiveDate;
use monchantier_shared::types::{CategoryId, ChantierId, CurrencyCode, Money, RecordId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregator::{RollupAggregator, RollupDimension};
use crate::currency::{ExchangeRateTable, to_base};
use crate::records::{EntityDirectory, Expense, FinancialRecord, Transfer};

fn rates() -> ExchangeRateTable {
    let code = |s: &str| CurrencyCode::parse(s).unwrap();
    ExchangeRateTable::new(code("TND"))
        .with_rate(code("EUR"), Decimal::new(335, 2))
        .unwrap()
        .with_rate(code("USD"), Decimal::new(310, 2))
        .unwrap()
}

/// Strategy for one record: expenses on a few chantiers, some uncategorized,
/// plus chantier-less transfers. Amounts may be zero or negative.
fn record() -> impl Strategy<Value = FinancialRecord> {
    let amount = (-1_000_000i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2));
    let currency = prop_oneof![Just("TND"), Just("EUR"), Just("USD")];
    let chantier = prop::option::of("[A-D]");
    let category = prop::option::of("(mat|mo|loc)");

    (amount, currency, chantier, category).prop_map(|(amount, currency, chantier, category)| -> FinancialRecord {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let amount = Money::new(amount, CurrencyCode::parse(currency).unwrap());
        match chantier {
            Some(chantier) => Expense {
                id: RecordId::from("e"),
                date,
                amount,
                chantier_id: ChantierId::new(chantier),
                category_id: category.map(CategoryId),
                payer: None,
            }
            .into(),
            None => Transfer {
                id: RecordId::from("t"),
                date,
                amount,
                chantier_id: None,
                category_id: category.map(CategoryId),
                source: "A".to_string(),
                destination: "B".to_string(),
                amount_base: None,
            }
            .into(),
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Sum of rollup totals equals the sum of all converted amounts.
    #[test]
    fn prop_rollup_completeness(
        records in prop::collection::vec(record(), 0..40),
        by_category in any::<bool>(),
    ) {
        let rates = rates();
        let dimension = if by_category { RollupDimension::Category } else { RollupDimension::Chantier };

        let rollups = RollupAggregator::rollup_by(&records, dimension, &rates, &EntityDirectory::default()).unwrap();

        let expected: Decimal = records
            .iter()
            .map(|r| to_base(r.amount(), &rates).unwrap())
            .sum();
        let actual: Decimal = rollups.iter().map(|r| r.total_base).sum();
        prop_assert_eq!(actual, expected);

        let counted: usize = rollups.iter().map(|r| r.record_count).sum();
        prop_assert_eq!(counted, records.len());
    }

    /// Keys are unique.
    #[test]
    fn prop_rollup_keys_unique(records in prop::collection::vec(record(), 0..40)) {
        let rollups = RollupAggregator::rollup_by(
            &records,
            RollupDimension::Chantier,
            &rates(),
            &EntityDirectory::default(),
        )
        .unwrap();

        let keys: HashSet<Option<&str>> = rollups.iter().map(|r| r.key.as_deref()).collect();
        prop_assert_eq!(keys.len(), rollups.len());
    }
}
