//! Key-value registries for projects and resolved dependencies.
//!
//! The tracker only talks to the [`Store`] trait, so each tracker (and each
//! test) can be handed its own isolated [`MemoryStore`].

use dashmap::DashMap;

/// A shared key-value store.
pub trait Store<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;

    /// Inserts or overwrites the value for `key`.
    fn set(&self, key: String, value: V);

    /// Returns a snapshot of all stored values, in no particular order.
    fn values(&self) -> Vec<V>;
}

/// Process-local store backed by a concurrent map.
pub struct MemoryStore<V> {
    entries: DashMap<String, V>,
}

impl<V> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> Store<V> for MemoryStore<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: String, value: V) {
        self.entries.insert(key, value);
    }

    fn values(&self) -> Vec<V> {
        self.entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
