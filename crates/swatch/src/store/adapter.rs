//! Key-value persistence boundary.

use thiserror::Error;

/// Failure of a store write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The medium has no room for the value.
    #[error("quota exceeded writing '{key}': needs {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// The medium could not be read or written.
    #[error("I/O failure for '{key}': {message}")]
    Io { key: String, message: String },
}

impl StoreError {
    /// Check if this is a capacity failure (eviction may help).
    pub fn is_quota(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }
}

/// Synchronous, capacity-bounded string store.
///
/// This is the whole surface the engine needs from a persistence medium.
/// Implementations decide what "capacity" means; writes that do not fit
/// must fail with [`StoreError::QuotaExceeded`] and leave the previous
/// value in place.
pub trait StoreAdapter: Send {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Missing keys are ignored.
    fn remove(&mut self, key: &str);

    /// Keys starting with `prefix`, oldest write first.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
}
