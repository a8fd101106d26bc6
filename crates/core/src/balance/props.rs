//! Property-based tests for actor balances.
//!
//! - Conservation: transfers between named actors cancel out, so the sum of
//!   balances is minus the sum of expenses paid
//! - Each balance matches its own components

use chrono::NaiveDate;
use monchantier_shared::types::{ChantierId, CurrencyCode, Money, RecordId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::actor::BalanceCalculator;
use crate::currency::ExchangeRateTable;
use crate::records::{Expense, Transfer};

fn rates() -> ExchangeRateTable {
    let code = |s: &str| CurrencyCode::parse(s).unwrap();
    ExchangeRateTable::new(code("TND"))
        .with_rate(code("EUR"), Decimal::new(335, 2))
        .unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn amount() -> impl Strategy<Value = Money> {
    (
        (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        prop_oneof![Just("TND"), Just("EUR")],
    )
        .prop_map(|(value, currency)| Money::new(value, CurrencyCode::parse(currency).unwrap()))
}

fn actor() -> impl Strategy<Value = String> {
    prop_oneof![Just("Alice"), Just("Bob"), Just("Carol"), Just("Dave")].prop_map(str::to_string)
}

fn transfer() -> impl Strategy<Value = Transfer> {
    (actor(), actor(), amount()).prop_map(|(source, destination, amount)| Transfer {
        id: RecordId::from("t"),
        date: date(),
        amount,
        chantier_id: None,
        category_id: None,
        source,
        destination,
        amount_base: None,
    })
}

fn expense() -> impl Strategy<Value = Expense> {
    (prop::option::of(actor()), amount()).prop_map(|(payer, amount)| Expense {
        id: RecordId::from("e"),
        date: date(),
        amount,
        chantier_id: ChantierId::from("X"),
        category_id: None,
        payer,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_balance_conservation(
        transfers in prop::collection::vec(transfer(), 0..30),
        expenses in prop::collection::vec(expense(), 0..30),
    ) {
        let balances = BalanceCalculator::compute_balances(&transfers, &expenses, &rates()).unwrap();

        let total_balance: Decimal = balances.iter().map(|b| b.balance).sum();
        let total_paid: Decimal = balances.iter().map(|b| b.expenses_paid).sum();
        prop_assert_eq!(total_balance, -total_paid);

        for b in &balances {
            prop_assert_eq!(b.balance, b.received - b.given - b.expenses_paid);
        }
    }
}
