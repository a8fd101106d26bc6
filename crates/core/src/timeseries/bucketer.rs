//! Monthly buckets with a running cumulative total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::month::MonthKey;
use crate::currency::{ExchangeRateTable, checked_sum, to_base};
use crate::error::AggregationResult;
use crate::records::FinancialRecord;

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// Month the bucket covers.
    pub month_key: MonthKey,
    /// Sum of the month's amounts in base currency.
    pub period_total_base: Decimal,
    /// Sum of this month and every earlier bucket.
    pub cumulative_total_base: Decimal,
    /// Number of records dated in the month.
    pub record_count: usize,
}

/// Groups records into calendar months.
pub struct TimeSeriesBucketer;

impl TimeSeriesBucketer {
    /// Buckets `records` by month, ordered by ascending month.
    ///
    /// Records are sorted by date (stable on ties) before accumulation, so the
    /// input order does not matter. Months with no records produce no bucket.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` if any record's currency has no rate, or
    /// `Overflow` if a running total leaves the `Decimal` range.
    pub fn bucket_by_month<'a>(
        records: impl IntoIterator<Item = &'a FinancialRecord>,
        rates: &ExchangeRateTable,
    ) -> AggregationResult<Vec<TimeBucket>> {
        let mut dated = records
            .into_iter()
            .map(|record| -> AggregationResult<_> {
                Ok((record.date(), to_base(record.amount(), rates)?))
            })
            .collect::<AggregationResult<Vec<_>>>()?;
        dated.sort_by_key(|(date, _)| *date);

        let mut buckets: Vec<TimeBucket> = Vec::new();
        let mut running = Decimal::ZERO;

        for (date, value) in dated {
            let month_key = MonthKey::of(date);
            running = checked_sum(running, value, "cumulative total")?;
            match buckets.last_mut() {
                Some(bucket) if bucket.month_key == month_key => {
                    bucket.period_total_base =
                        checked_sum(bucket.period_total_base, value, "period total")?;
                    bucket.cumulative_total_base = running;
                    bucket.record_count += 1;
                }
                _ => buckets.push(TimeBucket {
                    month_key,
                    period_total_base: value,
                    cumulative_total_base: running,
                    record_count: 1,
                }),
            }
        }

        debug!(buckets = buckets.len(), "Bucketed records by month");
        Ok(buckets)
    }
}
