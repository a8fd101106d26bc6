//! Presentation boundary: base totals converted to a display currency.
//!
//! This is the only place a display currency appears. Amounts are converted
//! with [`from_base`] and rounded once with banker's rounding. Percentage
//! shares are computed from base totals, so they do not depend on the
//! display currency.

use monchantier_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::DashboardSummary;
use crate::balance::ActorBalance;
use crate::currency::{ExchangeRateTable, ShareUtil, from_base, round_display};
use crate::error::AggregationResult;
use crate::rollup::Rollup;
use crate::timeseries::{MonthKey, TimeBucket};

/// Decimal places of percentage shares.
const SHARE_DECIMAL_PLACES: u32 = 2;

/// Totals in display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTotals {
    /// Sum of expenses.
    pub expenses: Decimal,
    /// Sum of quotes.
    pub quotes: Decimal,
    /// Sum of transfers.
    pub transfers: Decimal,
    /// Transfers minus expenses.
    pub remaining: Decimal,
    /// Number of records in the working set.
    pub record_count: usize,
}

/// One bar or slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRollup {
    /// Entity id; `None` for the unassigned group.
    pub key: Option<String>,
    /// Group label.
    pub label: String,
    /// Total in display currency.
    pub total: Decimal,
    /// Share of the dimension's total, in percent.
    ///
    /// `None` when shares are meaningless (a negative or all-zero total).
    pub share_percent: Option<Decimal>,
    /// Number of records in the group.
    pub record_count: usize,
}

/// One point of the monthly series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBucket {
    /// Month.
    pub month_key: MonthKey,
    /// Month total.
    pub period_total: Decimal,
    /// Running total.
    pub cumulative_total: Decimal,
}

/// One row of the balance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBalance {
    /// Actor name.
    pub actor_name: String,
    /// Received through transfers.
    pub received: Decimal,
    /// Given through transfers.
    pub given: Decimal,
    /// Expenses paid.
    pub expenses_paid: Decimal,
    /// Net balance.
    pub balance: Decimal,
}

/// A summary ready for charts and tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Snapshot version.
    pub snapshot_version: u64,
    /// Currency of every amount in the view.
    pub currency: CurrencyCode,
    /// Totals.
    pub totals: DisplayTotals,
    /// Chantiers, largest total first.
    pub by_chantier: Vec<DisplayRollup>,
    /// Categories, largest total first.
    pub by_category: Vec<DisplayRollup>,
    /// Monthly series, ascending.
    pub monthly: Vec<DisplayBucket>,
    /// Balances, largest absolute balance first.
    pub balances: Vec<DisplayBalance>,
    /// Whether the underlying summary came from the cache.
    pub cached: bool,
}

/// Converts one base amount for display.
struct Presenter<'a> {
    currency: &'a CurrencyCode,
    rates: &'a ExchangeRateTable,
    decimal_places: u32,
}

impl Presenter<'_> {
    fn amount(&self, value_base: Decimal) -> AggregationResult<Decimal> {
        let converted = from_base(value_base, self.currency, self.rates)?;
        Ok(round_display(converted, self.decimal_places))
    }

    fn rollups(&self, rollups: &[Rollup]) -> AggregationResult<Vec<DisplayRollup>> {
        let mut sorted: Vec<&Rollup> = rollups.iter().collect();
        sorted.sort_by(|a, b| {
            b.total_base
                .cmp(&a.total_base)
                .then_with(|| a.label.cmp(&b.label))
        });

        let weights: Vec<Decimal> = sorted.iter().map(|r| r.total_base).collect();
        let shares = ShareUtil::percent_shares(&weights, SHARE_DECIMAL_PLACES);

        sorted
            .into_iter()
            .enumerate()
            .map(|(i, rollup)| -> AggregationResult<DisplayRollup> {
                Ok(DisplayRollup {
                    key: rollup.key.clone(),
                    label: rollup.label.clone(),
                    total: self.amount(rollup.total_base)?,
                    share_percent: shares.as_ref().and_then(|s| s.get(i).copied()),
                    record_count: rollup.record_count,
                })
            })
            .collect()
    }

    fn buckets(&self, buckets: &[TimeBucket]) -> AggregationResult<Vec<DisplayBucket>> {
        buckets
            .iter()
            .map(|bucket| -> AggregationResult<DisplayBucket> {
                Ok(DisplayBucket {
                    month_key: bucket.month_key,
                    period_total: self.amount(bucket.period_total_base)?,
                    cumulative_total: self.amount(bucket.cumulative_total_base)?,
                })
            })
            .collect()
    }

    fn balances(&self, balances: &[ActorBalance]) -> AggregationResult<Vec<DisplayBalance>> {
        let mut sorted: Vec<&ActorBalance> = balances.iter().collect();
        sorted.sort_by(|a, b| {
            b.balance
                .abs()
                .cmp(&a.balance.abs())
                .then_with(|| a.actor_name.cmp(&b.actor_name))
        });

        sorted
            .into_iter()
            .map(|actor| -> AggregationResult<DisplayBalance> {
                Ok(DisplayBalance {
                    actor_name: actor.actor_name.clone(),
                    received: self.amount(actor.received)?,
                    given: self.amount(actor.given)?,
                    expenses_paid: self.amount(actor.expenses_paid)?,
                    balance: self.amount(actor.balance)?,
                })
            })
            .collect()
    }
}

impl DashboardView {
    /// Renders `summary` in `currency`.
    ///
    /// The monthly cumulative line is converted point by point; it is not
    /// re-accumulated from rounded period totals.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if `currency` has no usable rate in `rates`,
    /// or `Overflow` if a converted amount leaves the `Decimal` range.
    pub fn render(
        summary: &DashboardSummary,
        currency: &CurrencyCode,
        rates: &ExchangeRateTable,
        decimal_places: u32,
    ) -> AggregationResult<Self> {
        let presenter = Presenter {
            currency,
            rates,
            decimal_places,
        };
        let totals = &summary.totals;

        Ok(Self {
            snapshot_version: summary.snapshot_version,
            currency: currency.clone(),
            totals: DisplayTotals {
                expenses: presenter.amount(totals.expenses_base)?,
                quotes: presenter.amount(totals.quotes_base)?,
                transfers: presenter.amount(totals.transfers_base)?,
                remaining: presenter.amount(totals.remaining_base()?)?,
                record_count: totals.record_count,
            },
            by_chantier: presenter.rollups(&summary.by_chantier)?,
            by_category: presenter.rollups(&summary.by_category)?,
            monthly: presenter.buckets(&summary.monthly)?,
            balances: presenter.balances(&summary.balances)?,
            cached: summary.cached,
        })
    }
}
