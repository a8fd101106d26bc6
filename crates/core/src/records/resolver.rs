//! Entity label resolution.

use std::collections::HashMap;

use super::types::Entity;

/// Resolves an entity id to its display name.
///
/// Returning `None` is not an error: callers fall back to the raw id.
pub trait EntityResolver {
    /// Returns the display name for `key`, if known.
    fn resolve(&self, key: &str) -> Option<String>;

    /// Returns the display name for `key`, or `key` itself.
    fn label_or_key(&self, key: &str) -> String {
        self.resolve(key).unwrap_or_else(|| key.to_string())
    }
}

impl<F> EntityResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Id-to-name lookup built from entity lists.
#[derive(Debug, Clone, Default)]
pub struct EntityDirectory {
    names: HashMap<String, String>,
}

impl EntityDirectory {
    /// Builds a directory from entities; later duplicates win.
    pub fn from_entities<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Self {
        let names = entities
            .into_iter()
            .map(|e| (e.id.clone(), e.name.clone()))
            .collect();
        Self { names }
    }

    /// Returns the number of known entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no entity is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl EntityResolver for EntityDirectory {
    fn resolve(&self, key: &str) -> Option<String> {
        self.names.get(key).cloned()
    }
}
