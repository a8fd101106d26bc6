//! Record selection: primary filter intersected with the cross filter.

pub mod criteria;
pub mod cross;

pub use criteria::{FilterCriteria, RecordTypeFilter};
pub use cross::{CrossFilter, SelectionEvent, SelectionMode};

use crate::records::FinancialRecord;

/// Returns true if `record` passes both filters.
#[must_use]
pub fn passes(record: &FinancialRecord, primary: &FilterCriteria, cross: &CrossFilter) -> bool {
    primary.matches(record) && cross.admits(record)
}

/// Selects the working set, preserving input order.
pub fn select_records<'a>(
    records: impl IntoIterator<Item = &'a FinancialRecord>,
    primary: &FilterCriteria,
    cross: &CrossFilter,
) -> Vec<&'a FinancialRecord> {
    records
        .into_iter()
        .filter(|record| passes(record, primary, cross))
        .collect()
}
