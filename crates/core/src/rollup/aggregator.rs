//! Entity rollups: totals per chantier or per category.

use std::collections::HashMap;

use monchantier_shared::types::{CategoryId, ChantierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::currency::{ExchangeRateTable, checked_sum, to_base};
use crate::error::AggregationResult;
use crate::records::{EntityResolver, FinancialRecord};

/// Label of the group collecting records with no id on the rolled-up dimension.
pub const UNASSIGNED_LABEL: &str = "unassigned";

/// Dimension a rollup groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupDimension {
    /// Group by owning chantier.
    Chantier,
    /// Group by category.
    Category,
}

impl RollupDimension {
    /// Returns the id of `record` on this dimension, `None` when it has none.
    #[must_use]
    pub fn key_of(self, record: &FinancialRecord) -> Option<&str> {
        match self {
            Self::Chantier => record.chantier_id().map(ChantierId::as_str),
            Self::Category => record.category_id().map(CategoryId::as_str),
        }
    }
}

/// Total of one group, in base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rollup {
    /// Entity id; `None` for the unassigned group.
    ///
    /// Kept apart from real ids, so an entity whose id happens to read
    /// "unassigned" is never merged with it.
    pub key: Option<String>,
    /// Display label; the id itself when unresolved, [`UNASSIGNED_LABEL`]
    /// for the unassigned group.
    pub label: String,
    /// Sum of the group's amounts in base currency.
    pub total_base: Decimal,
    /// Number of records in the group.
    pub record_count: usize,
}

impl Rollup {
    /// Returns true for the group of records with no id on the dimension.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        self.key.is_none()
    }
}

/// Groups records and sums their base-currency amounts.
pub struct RollupAggregator;

impl RollupAggregator {
    /// Rolls `records` up by `dimension`.
    ///
    /// Returns exactly one rollup per distinct key, in first-seen order.
    /// Records without an id on the dimension land in the unassigned group.
    /// Zero and negative amounts are summed like any other.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCurrency` as soon as one record's currency has no rate,
    /// or `Overflow` if a group total leaves the `Decimal` range; no partial
    /// result is produced.
    pub fn rollup_by<'a, R>(
        records: impl IntoIterator<Item = &'a FinancialRecord>,
        dimension: RollupDimension,
        rates: &ExchangeRateTable,
        resolver: &R,
    ) -> AggregationResult<Vec<Rollup>>
    where
        R: EntityResolver + ?Sized,
    {
        let mut index: HashMap<Option<&'a str>, usize> = HashMap::new();
        let mut groups: Vec<(Option<&'a str>, Decimal, usize)> = Vec::new();

        for record in records {
            let value = to_base(record.amount(), rates)?;
            let key = dimension.key_of(record);
            match index.get(&key) {
                Some(&slot) => {
                    let group = &mut groups[slot];
                    group.1 = checked_sum(group.1, value, "rollup total")?;
                    group.2 += 1;
                }
                None => {
                    index.insert(key, groups.len());
                    groups.push((key, value, 1));
                }
            }
        }

        debug!(?dimension, groups = groups.len(), "Rolled up records");

        Ok(groups
            .into_iter()
            .map(|(key, total_base, record_count)| {
                let label = match key {
                    Some(id) => resolver.resolve(id).unwrap_or_else(|| {
                        warn!(?dimension, key = id, "Unresolved entity label, using id");
                        id.to_string()
                    }),
                    None => UNASSIGNED_LABEL.to_string(),
                };
                Rollup {
                    key: key.map(str::to_string),
                    label,
                    total_base,
                    record_count,
                }
            })
            .collect())
    }
}
