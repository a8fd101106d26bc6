//! Dashboard aggregation pass.

use tracing::{debug, info};

use super::types::{DashboardSummary, DashboardTotals};
use crate::balance::BalanceCalculator;
use crate::currency::to_base;
use crate::error::AggregationResult;
use crate::filter::{CrossFilter, FilterCriteria, select_records};
use crate::records::{DashboardSnapshot, FinancialRecord};
use crate::rollup::{RollupAggregator, RollupDimension};
use crate::timeseries::TimeSeriesBucketer;

/// Runs every aggregation over one filtered working set.
pub struct DashboardService;

impl DashboardService {
    /// Summarizes `snapshot` under the primary filter and the cross filter.
    ///
    /// The working set is the records passing both filters, in snapshot
    /// order. All outputs are derived from that one set.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` if any record in the working set has a
    /// currency missing from the snapshot's rate table, or `Overflow` if a
    /// total leaves the `Decimal` range.
    pub fn summarize(
        snapshot: &DashboardSnapshot,
        primary: &FilterCriteria,
        cross: &CrossFilter,
    ) -> AggregationResult<DashboardSummary> {
        let rates = &snapshot.rates;
        let working = select_records(snapshot.records(), primary, cross);
        debug!(
            version = snapshot.version,
            total = snapshot.records().len(),
            selected = working.len(),
            "Selected working set"
        );

        let mut totals = DashboardTotals::default();
        for record in &working {
            totals.add(record.kind(), to_base(record.amount(), rates)?)?;
        }

        let by_chantier = RollupAggregator::rollup_by(
            working.iter().copied(),
            RollupDimension::Chantier,
            rates,
            &snapshot.chantier_directory(),
        )?;
        let by_category = RollupAggregator::rollup_by(
            working.iter().copied(),
            RollupDimension::Category,
            rates,
            &snapshot.category_directory(),
        )?;
        let monthly = TimeSeriesBucketer::bucket_by_month(working.iter().copied(), rates)?;
        let balances = BalanceCalculator::compute_balances(
            working.iter().copied().filter_map(FinancialRecord::as_transfer),
            working.iter().copied().filter_map(FinancialRecord::as_expense),
            rates,
        )?;

        info!(
            version = snapshot.version,
            records = totals.record_count,
            chantiers = by_chantier.len(),
            categories = by_category.len(),
            months = monthly.len(),
            actors = balances.len(),
            "Dashboard summarized"
        );

        Ok(DashboardSummary {
            snapshot_version: snapshot.version,
            base_currency: rates.base().clone(),
            totals,
            by_chantier,
            by_category,
            monthly,
            balances,
            cached: false,
        })
    }
}
