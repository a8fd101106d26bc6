//! Net balances per named actor.
//!
//! - received: transfers where the actor is the destination
//! - given: transfers where the actor is the source
//! - expenses paid: expenses naming the actor as payer
//!
//! `balance = received - given - expenses_paid`. A positive balance means the
//! actor still holds money it was handed; a negative one means it is owed.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::currency::{ExchangeRateTable, checked_diff, checked_sum, to_base};
use crate::error::AggregationResult;
use crate::records::{Expense, Transfer};

/// Running position of one actor, in base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorBalance {
    /// Trimmed actor name.
    pub actor_name: String,
    /// Total received through transfers.
    pub received: Decimal,
    /// Total given through transfers.
    pub given: Decimal,
    /// Total of expenses paid.
    pub expenses_paid: Decimal,
    /// `received - given - expenses_paid`.
    pub balance: Decimal,
}

impl ActorBalance {
    /// Creates an actor with no activity.
    #[must_use]
    pub fn new(actor_name: impl Into<String>) -> Self {
        Self {
            actor_name: actor_name.into(),
            received: Decimal::ZERO,
            given: Decimal::ZERO,
            expenses_paid: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    /// Adds a received amount.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if a total leaves the `Decimal` range; the actor is
    /// left unchanged.
    pub fn add_received(&mut self, amount: Decimal) -> AggregationResult<()> {
        let received = checked_sum(self.received, amount, "actor received")?;
        self.commit(received, self.given, self.expenses_paid)
    }

    /// Adds a given amount.
    ///
    /// # Errors
    ///
    /// Same as [`add_received`](Self::add_received).
    pub fn add_given(&mut self, amount: Decimal) -> AggregationResult<()> {
        let given = checked_sum(self.given, amount, "actor given")?;
        self.commit(self.received, given, self.expenses_paid)
    }

    /// Adds a paid expense.
    ///
    /// # Errors
    ///
    /// Same as [`add_received`](Self::add_received).
    pub fn add_expense_paid(&mut self, amount: Decimal) -> AggregationResult<()> {
        let expenses_paid = checked_sum(self.expenses_paid, amount, "actor expenses")?;
        self.commit(self.received, self.given, expenses_paid)
    }

    fn commit(
        &mut self,
        received: Decimal,
        given: Decimal,
        expenses_paid: Decimal,
    ) -> AggregationResult<()> {
        let net = checked_diff(received, given, "actor balance")?;
        self.balance = checked_diff(net, expenses_paid, "actor balance")?;
        self.received = received;
        self.given = given;
        self.expenses_paid = expenses_paid;
        Ok(())
    }
}

/// Accumulates actors in first-seen order.
#[derive(Default)]
struct Ledger {
    index: HashMap<String, usize>,
    actors: Vec<ActorBalance>,
}

impl Ledger {
    /// Returns the entry for `name`, or `None` if the name is blank.
    fn entry(&mut self, name: &str) -> Option<&mut ActorBalance> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let slot = match self.index.get(name) {
            Some(&slot) => slot,
            None => {
                let slot = self.actors.len();
                self.index.insert(name.to_string(), slot);
                self.actors.push(ActorBalance::new(name));
                slot
            }
        };
        self.actors.get_mut(slot)
    }
}

/// Computes actor balances from transfers and expenses.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Computes one balance per actor that gave, received or paid anything.
    ///
    /// Actors come out in first-seen order: transfers first (source before
    /// destination), then expense payers. A transfer's stored `amount_base`
    /// is used when present; otherwise its amount is converted. Expenses
    /// without a payer only affect rollups, never balances.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` if an amount that needs converting has no rate,
    /// or `Overflow` if an actor's totals leave the `Decimal` range.
    pub fn compute_balances<'a>(
        transfers: impl IntoIterator<Item = &'a Transfer>,
        expenses: impl IntoIterator<Item = &'a Expense>,
        rates: &ExchangeRateTable,
    ) -> AggregationResult<Vec<ActorBalance>> {
        let mut ledger = Ledger::default();

        for transfer in transfers {
            let value = match transfer.amount_base {
                Some(stored) => stored,
                None => to_base(&transfer.amount, rates)?,
            };
            if let Some(source) = ledger.entry(&transfer.source) {
                source.add_given(value)?;
            }
            if let Some(destination) = ledger.entry(&transfer.destination) {
                destination.add_received(value)?;
            }
        }

        for expense in expenses {
            let Some(payer) = expense.payer.as_deref() else {
                continue;
            };
            let value = to_base(&expense.amount, rates)?;
            if let Some(actor) = ledger.entry(payer) {
                actor.add_expense_paid(value)?;
            }
        }

        debug!(actors = ledger.actors.len(), "Computed actor balances");
        Ok(ledger.actors)
    }
}
