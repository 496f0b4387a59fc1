//! Name-indexed definition table.
//!
//! A `Registry` stores definitions in insertion order (their index is their
//! id) and keeps a name index for the cross-references between documents.

use rustc_hash::FxHashMap;
use tracing::warn;

/// Anything stored in a `Registry`.
pub trait Named {
    fn name(&self) -> &str;
}

/// Ordered table of definitions with lookup by index and by name.
#[derive(Clone, Debug)]
pub struct Registry<T> {
    items: Vec<T>,
    by_name: FxHashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }
}

impl<T: Named> Registry<T> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition built from its index and return that index.
    ///
    /// If the name is already taken the earlier definition keeps the name
    /// lookup; the new one is still reachable by index.
    pub fn register_with(&mut self, build: impl FnOnce(usize) -> T) -> usize {
        let index = self.items.len();
        let item = build(index);
        if self.by_name.contains_key(item.name()) {
            warn!(name = item.name(), index, "Duplicate definition name");
        } else {
            self.by_name.insert(item.name().to_string(), index);
        }
        self.items.push(item);
        index
    }

    /// Get a definition by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Index of the definition with this name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Get a definition by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&T> {
        self.index_of(name).and_then(|index| self.items.get(index))
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// All definitions as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}
