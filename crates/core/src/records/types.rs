//! Financial record types.
//!
//! Records arrive already deduplicated from the persistence layer; the
//! engine only reads them.

use chrono::NaiveDate;
use monchantier_shared::types::{CategoryId, ChantierId, Money, RecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named entity referenced by id (chantier or category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Identifier as stored.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Entity {
    /// Creates an entity.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An expense paid on a chantier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Record ID.
    pub id: RecordId,
    /// Day the expense was incurred.
    pub date: NaiveDate,
    /// Amount in its original currency.
    pub amount: Money,
    /// Owning chantier.
    pub chantier_id: ChantierId,
    /// Expense category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Actor who paid, if known.
    #[serde(default)]
    pub payer: Option<String>,
}

/// A quote (devis) received for a chantier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Record ID.
    pub id: RecordId,
    /// Quote date.
    pub date: NaiveDate,
    /// Quoted amount.
    pub amount: Money,
    /// Chantier the quote is for.
    pub chantier_id: ChantierId,
    /// Category of the quoted work.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// A budget transfer between two named actors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Record ID.
    pub id: RecordId,
    /// Transfer date.
    pub date: NaiveDate,
    /// Transferred amount.
    pub amount: Money,
    /// Chantier funded by the transfer, if any.
    #[serde(default)]
    pub chantier_id: Option<ChantierId>,
    /// Category, if any.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Actor giving the money.
    pub source: String,
    /// Actor receiving the money.
    pub destination: String,
    /// Base-currency amount captured when the transfer was recorded.
    #[serde(default)]
    pub amount_base: Option<Decimal>,
}

/// Discriminant of a [`FinancialRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Expense.
    Expense,
    /// Quote.
    Quote,
    /// Transfer.
    Transfer,
}

/// Any record the engine aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FinancialRecord {
    /// Expense record.
    Expense(Expense),
    /// Quote record.
    Quote(Quote),
    /// Transfer record.
    Transfer(Transfer),
}

impl FinancialRecord {
    /// Returns the record kind.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Expense(_) => RecordKind::Expense,
            Self::Quote(_) => RecordKind::Quote,
            Self::Transfer(_) => RecordKind::Transfer,
        }
    }

    /// Returns the record ID.
    #[must_use]
    pub const fn id(&self) -> &RecordId {
        match self {
            Self::Expense(e) => &e.id,
            Self::Quote(q) => &q.id,
            Self::Transfer(t) => &t.id,
        }
    }

    /// Returns the record date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Expense(e) => e.date,
            Self::Quote(q) => q.date,
            Self::Transfer(t) => t.date,
        }
    }

    /// Returns the amount in its original currency.
    #[must_use]
    pub const fn amount(&self) -> &Money {
        match self {
            Self::Expense(e) => &e.amount,
            Self::Quote(q) => &q.amount,
            Self::Transfer(t) => &t.amount,
        }
    }

    /// Returns the owning chantier, if any.
    #[must_use]
    pub const fn chantier_id(&self) -> Option<&ChantierId> {
        match self {
            Self::Expense(e) => Some(&e.chantier_id),
            Self::Quote(q) => Some(&q.chantier_id),
            Self::Transfer(t) => t.chantier_id.as_ref(),
        }
    }

    /// Returns the category, if any.
    #[must_use]
    pub const fn category_id(&self) -> Option<&CategoryId> {
        match self {
            Self::Expense(e) => e.category_id.as_ref(),
            Self::Quote(q) => q.category_id.as_ref(),
            Self::Transfer(t) => t.category_id.as_ref(),
        }
    }

    /// Returns the expense, if this is one.
    #[must_use]
    pub const fn as_expense(&self) -> Option<&Expense> {
        match self {
            Self::Expense(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the transfer, if this is one.
    #[must_use]
    pub const fn as_transfer(&self) -> Option<&Transfer> {
        match self {
            Self::Transfer(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Expense> for FinancialRecord {
    fn from(expense: Expense) -> Self {
        Self::Expense(expense)
    }
}

impl From<Quote> for FinancialRecord {
    fn from(quote: Quote) -> Self {
        Self::Quote(quote)
    }
}

impl From<Transfer> for FinancialRecord {
    fn from(transfer: Transfer) -> Self {
        Self::Transfer(transfer)
    }
}
