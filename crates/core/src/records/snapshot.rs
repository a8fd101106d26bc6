//! In-memory data snapshot handed over by the persistence layer.

use serde::{Deserialize, Serialize};

use super::resolver::EntityDirectory;
use super::types::{Entity, Expense, FinancialRecord, Quote, Transfer};
use crate::currency::ExchangeRateTable;

/// Everything one aggregation pass reads.
///
/// `version` identifies the snapshot for memoization: two snapshots with the
/// same version must hold the same data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSnapshot", into = "RawSnapshot")]
pub struct DashboardSnapshot {
    /// Snapshot version.
    pub version: u64,
    /// Known chantiers.
    pub chantiers: Vec<Entity>,
    /// Known categories.
    pub categories: Vec<Entity>,
    /// Exchange rates in force for this snapshot.
    pub rates: ExchangeRateTable,
    records: Vec<FinancialRecord>,
}

/// Wire shape: one list per record kind, as the API serves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    version: u64,
    #[serde(default)]
    chantiers: Vec<Entity>,
    #[serde(default)]
    categories: Vec<Entity>,
    #[serde(default)]
    expenses: Vec<Expense>,
    #[serde(default)]
    quotes: Vec<Quote>,
    #[serde(default)]
    transfers: Vec<Transfer>,
    rates: ExchangeRateTable,
}

impl DashboardSnapshot {
    /// Creates a snapshot with no records.
    #[must_use]
    pub fn new(version: u64, rates: ExchangeRateTable) -> Self {
        Self {
            version,
            chantiers: Vec::new(),
            categories: Vec::new(),
            rates,
            records: Vec::new(),
        }
    }

    /// Adds a record.
    #[must_use]
    pub fn with_record(mut self, record: impl Into<FinancialRecord>) -> Self {
        self.records.push(record.into());
        self
    }

    /// Adds a chantier.
    #[must_use]
    pub fn with_chantier(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.chantiers.push(Entity::new(id, name));
        self
    }

    /// Adds a category.
    #[must_use]
    pub fn with_category(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.categories.push(Entity::new(id, name));
        self
    }

    /// All records in insertion order.
    ///
    /// A deserialized snapshot lists expenses, then quotes, then transfers.
    #[must_use]
    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    /// Label lookup for chantier ids.
    #[must_use]
    pub fn chantier_directory(&self) -> EntityDirectory {
        EntityDirectory::from_entities(&self.chantiers)
    }

    /// Label lookup for category ids.
    #[must_use]
    pub fn category_directory(&self) -> EntityDirectory {
        EntityDirectory::from_entities(&self.categories)
    }
}

impl From<RawSnapshot> for DashboardSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        let records = raw
            .expenses
            .into_iter()
            .map(FinancialRecord::Expense)
            .chain(raw.quotes.into_iter().map(FinancialRecord::Quote))
            .chain(raw.transfers.into_iter().map(FinancialRecord::Transfer))
            .collect();

        Self {
            version: raw.version,
            chantiers: raw.chantiers,
            categories: raw.categories,
            rates: raw.rates,
            records,
        }
    }
}

impl From<DashboardSnapshot> for RawSnapshot {
    fn from(snapshot: DashboardSnapshot) -> Self {
        let mut expenses = Vec::new();
        let mut quotes = Vec::new();
        let mut transfers = Vec::new();
        for record in snapshot.records {
            match record {
                FinancialRecord::Expense(e) => expenses.push(e),
                FinancialRecord::Quote(q) => quotes.push(q),
                FinancialRecord::Transfer(t) => transfers.push(t),
            }
        }

        Self {
            version: snapshot.version,
            chantiers: snapshot.chantiers,
            categories: snapshot.categories,
            expenses,
            quotes,
            transfers,
            rates: snapshot.rates,
        }
    }
}
