//! In-process store.

use indexmap::IndexMap;

use super::adapter::{StoreAdapter, StoreError};

/// Capacity-bounded in-memory store.
///
/// Capacity counts the bytes of every key plus its value, the way browser
/// local storage quotas do. Insertion order is kept, and overwriting a key
/// moves it to the newest position.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: IndexMap<String, String>,
    capacity: usize,
}

impl MemoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::with_capacity(usize::MAX)
    }

    /// Create a store that holds at most `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity,
        }
    }

    /// Bytes currently used.
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreAdapter for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let existing = self.entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
        let available = self
            .capacity
            .saturating_sub(self.used_bytes().saturating_sub(existing));
        let needed = key.len() + value.len();

        if needed > available {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                needed,
                available,
            });
        }

        self.entries.shift_remove(key);
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.shift_remove(key);
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }
}
