//! Financial records, entities, and the data snapshot.

pub mod resolver;
pub mod snapshot;
pub mod types;

pub use resolver::{EntityDirectory, EntityResolver};
pub use snapshot::DashboardSnapshot;
pub use types::{Entity, Expense, FinancialRecord, Quote, RecordKind, Transfer};
