//! Dashboard summary types.
//!
//! Every amount here is in base currency. Display conversion happens in
//! [`super::view`].

use monchantier_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::ActorBalance;
use crate::currency::{checked_diff, checked_sum};
use crate::error::AggregationResult;
use crate::records::RecordKind;
use crate::rollup::Rollup;
use crate::timeseries::TimeBucket;

/// Totals per record kind over the working set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    /// Sum of expenses.
    pub expenses_base: Decimal,
    /// Sum of quotes.
    pub quotes_base: Decimal,
    /// Sum of transfers.
    pub transfers_base: Decimal,
    /// Number of records in the working set.
    pub record_count: usize,
}

impl DashboardTotals {
    /// Adds one converted amount under `kind`.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the total leaves the `Decimal` range; the totals
    /// are left unchanged.
    pub fn add(&mut self, kind: RecordKind, value_base: Decimal) -> AggregationResult<()> {
        let total = match kind {
            RecordKind::Expense => &mut self.expenses_base,
            RecordKind::Quote => &mut self.quotes_base,
            RecordKind::Transfer => &mut self.transfers_base,
        };
        *total = checked_sum(*total, value_base, "kind total")?;
        self.record_count += 1;
        Ok(())
    }

    /// Funds transferred minus expenses.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the difference leaves the `Decimal` range.
    pub fn remaining_base(&self) -> AggregationResult<Decimal> {
        checked_diff(self.transfers_base, self.expenses_base, "remaining funds")
    }
}

/// One full aggregation pass over a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Version of the snapshot the summary was computed from.
    pub snapshot_version: u64,
    /// Currency every amount is expressed in.
    pub base_currency: CurrencyCode,
    /// Totals per record kind.
    pub totals: DashboardTotals,
    /// Rollup by chantier, first-seen order.
    pub by_chantier: Vec<Rollup>,
    /// Rollup by category, first-seen order.
    pub by_category: Vec<Rollup>,
    /// Monthly series, ascending.
    pub monthly: Vec<TimeBucket>,
    /// Actor balances, first-seen order.
    pub balances: Vec<ActorBalance>,
    /// Whether the summary was served from the cache.
    pub cached: bool,
}
