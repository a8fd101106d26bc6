//! Cross-filter selection state driven by chart clicks.
//!
//! The state is owned by the caller. Every transition takes the current
//! state and one selection event and returns the next state; nothing here
//! mutates shared state.

use std::collections::BTreeSet;

use monchantier_shared::types::{CategoryId, ChantierId};
use serde::{Deserialize, Serialize};

use super::criteria::member_or_unconstrained;
use crate::records::FinancialRecord;

/// How a click combines with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Plain click: select only this id, or clear if it was the only one.
    Toggle,
    /// Click with the modifier key held: add or remove this id.
    Multi,
}

impl SelectionMode {
    /// Maps the modifier-key state to a mode.
    #[must_use]
    pub const fn from_modifier(modifier_held: bool) -> Self {
        if modifier_held { Self::Multi } else { Self::Toggle }
    }
}

/// A single discrete selection event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// A chantier bar or slice was clicked.
    Chantier {
        /// Clicked chantier.
        id: ChantierId,
        /// Selection mode.
        mode: SelectionMode,
    },
    /// A category bar or slice was clicked.
    Category {
        /// Clicked category.
        id: CategoryId,
        /// Selection mode.
        mode: SelectionMode,
    },
    /// Clear both dimensions.
    Reset,
}

/// Pinned chantiers and categories.
///
/// An empty set means "no constraint" on that dimension, never "exclude all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrossFilter {
    /// Pinned chantiers.
    #[serde(default)]
    pub chantiers: BTreeSet<ChantierId>,
    /// Pinned categories.
    #[serde(default)]
    pub categories: BTreeSet<CategoryId>,
}

impl CrossFilter {
    /// Creates an empty cross filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state after `event`.
    #[must_use]
    pub fn apply(&self, event: &SelectionEvent) -> Self {
        match event {
            SelectionEvent::Chantier { id, mode } => Self {
                chantiers: select(&self.chantiers, id, *mode),
                categories: self.categories.clone(),
            },
            SelectionEvent::Category { id, mode } => Self {
                chantiers: self.chantiers.clone(),
                categories: select(&self.categories, id, *mode),
            },
            SelectionEvent::Reset => Self::default(),
        }
    }

    /// Returns true if nothing is pinned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chantiers.is_empty() && self.categories.is_empty()
    }

    /// Returns true if `record` passes the pinned selections.
    #[must_use]
    pub fn admits(&self, record: &FinancialRecord) -> bool {
        member_or_unconstrained(&self.chantiers, record.chantier_id())
            && member_or_unconstrained(&self.categories, record.category_id())
    }
}

/// Applies one selection to one dimension's set.
#[must_use]
pub fn select<T: Ord + Clone>(current: &BTreeSet<T>, id: &T, mode: SelectionMode) -> BTreeSet<T> {
    match mode {
        SelectionMode::Toggle => toggle_select(current, id),
        SelectionMode::Multi => multi_select(current, id),
    }
}

/// `{id}` becomes `{}`; anything else becomes `{id}`.
#[must_use]
pub fn toggle_select<T: Ord + Clone>(current: &BTreeSet<T>, id: &T) -> BTreeSet<T> {
    if current.len() == 1 && current.contains(id) {
        BTreeSet::new()
    } else {
        BTreeSet::from([id.clone()])
    }
}

/// Removes `id` if present, adds it otherwise; other members are kept.
#[must_use]
pub fn multi_select<T: Ord + Clone>(current: &BTreeSet<T>, id: &T) -> BTreeSet<T> {
    let mut next = current.clone();
    if !next.remove(id) {
        next.insert(id.clone());
    }
    next
}
