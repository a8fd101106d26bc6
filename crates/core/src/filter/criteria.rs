//! Primary (user-facing) filter criteria.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use monchantier_shared::types::{CategoryId, ChantierId};
use serde::{Deserialize, Serialize};

use crate::records::{FinancialRecord, RecordKind};

/// Which record kinds pass the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordTypeFilter {
    /// Every kind.
    #[default]
    All,
    /// Expenses only.
    Expense,
    /// Quotes only.
    Quote,
    /// Transfers only.
    Transfer,
}

impl RecordTypeFilter {
    /// Returns true if `kind` passes.
    #[must_use]
    pub const fn admits(self, kind: RecordKind) -> bool {
        matches!(
            (self, kind),
            (Self::All, _)
                | (Self::Expense, RecordKind::Expense)
                | (Self::Quote, RecordKind::Quote)
                | (Self::Transfer, RecordKind::Transfer)
        )
    }
}

/// Filter chosen by the user in the dashboard controls.
///
/// An empty id set places no constraint on that dimension. Date bounds are
/// inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Chantiers to keep.
    #[serde(default)]
    pub entity_ids: BTreeSet<ChantierId>,
    /// Categories to keep.
    #[serde(default)]
    pub category_ids: BTreeSet<CategoryId>,
    /// Earliest date kept.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Latest date kept.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    /// Record kinds kept.
    #[serde(default)]
    pub record_type: RecordTypeFilter,
}

impl FilterCriteria {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chantier to the filter.
    #[must_use]
    pub fn with_chantier(mut self, id: impl Into<ChantierId>) -> Self {
        self.entity_ids.insert(id.into());
        self
    }

    /// Adds a category to the filter.
    #[must_use]
    pub fn with_category(mut self, id: impl Into<CategoryId>) -> Self {
        self.category_ids.insert(id.into());
        self
    }

    /// Restricts the date range (inclusive on both ends).
    #[must_use]
    pub const fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Restricts the record kinds.
    #[must_use]
    pub const fn of_type(mut self, record_type: RecordTypeFilter) -> Self {
        self.record_type = record_type;
        self
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entity_ids.is_empty()
            && self.category_ids.is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.record_type == RecordTypeFilter::All
    }

    /// Returns true if `record` passes every constraint.
    #[must_use]
    pub fn matches(&self, record: &FinancialRecord) -> bool {
        if !self.record_type.admits(record.kind()) {
            return false;
        }

        let date = record.date();
        if self.date_from.is_some_and(|from| date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| date > to) {
            return false;
        }

        member_or_unconstrained(&self.entity_ids, record.chantier_id())
            && member_or_unconstrained(&self.category_ids, record.category_id())
    }
}

/// Empty set admits everything; otherwise the record must carry a member id.
pub(crate) fn member_or_unconstrained<T: Ord>(set: &BTreeSet<T>, id: Option<&T>) -> bool {
    set.is_empty() || id.is_some_and(|id| set.contains(id))
}
