//! In-memory cache of fetched icon markup.

use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory icon cache: identifier → raw markup text.
///
/// Populated exactly once per load cycle; an empty string records a total
/// load failure for that identifier. Entries persist for the process
/// lifetime.
#[derive(Debug, Default)]
pub struct IconCache {
    cache: Mutex<HashMap<String, String>>,
}

impl IconCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached markup for an identifier.
    pub fn get(&self, identifier: &str) -> Option<String> {
        let cache = self.cache.lock().unwrap();
        cache.get(identifier).cloned()
    }

    /// Store markup for an identifier.
    pub fn put(&self, identifier: String, markup: String) {
        let mut cache = self.cache.lock().unwrap();
        cache.insert(identifier, markup);
    }

    /// Number of cached identifiers.
    pub fn len(&self) -> usize {
        let cache = self.cache.lock().unwrap();
        cache.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        let cache = self.cache.lock().unwrap();
        cache.is_empty()
    }

    /// Whether an identifier has a cache entry.
    pub fn contains(&self, identifier: &str) -> bool {
        let cache = self.cache.lock().unwrap();
        cache.contains_key(identifier)
    }

    /// Clear the cache.
    pub fn clear(&self) {
        let mut cache = self.cache.lock().unwrap();
        cache.clear();
    }
}
