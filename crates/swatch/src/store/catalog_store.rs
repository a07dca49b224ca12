//! Namespaced access to the store, with eviction and write policies.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Result, SwatchError};
use crate::input::safe_parse;

use super::adapter::{StoreAdapter, StoreError};

/// The engine's view of a [`StoreAdapter`].
///
/// Every key is scoped under `<namespace>:`. Writes come in two flavours:
///
/// - [`write_best_effort`](Self::write_best_effort) for caching: a failed
///   write is logged and reported as `false`, never as an error.
/// - [`write_required`](Self::write_required) for explicit user saves: the
///   failure reaches the caller.
///
/// Both first try to make room by evicting cached thumbnails, oldest first.
pub struct CatalogStore {
    inner: Box<dyn StoreAdapter>,
    namespace: String,
    thumbnail_prefix: String,
}

impl CatalogStore {
    /// Wrap an adapter under a namespace.
    pub fn new(adapter: impl StoreAdapter + 'static, namespace: impl Into<String>) -> Self {
        Self {
            inner: Box::new(adapter),
            namespace: namespace.into(),
            thumbnail_prefix: "thumbs.".to_string(),
        }
    }

    /// Set the key prefix used for evictable thumbnails.
    pub fn with_thumbnail_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thumbnail_prefix = prefix.into();
        self
    }

    /// Namespace applied to every key.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The wrapped adapter, for inspection.
    pub fn adapter(&self) -> &dyn StoreAdapter {
        self.inner.as_ref()
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    /// Read the raw string under `key`.
    pub fn read_text(&self, key: &str) -> Option<String> {
        self.inner.get(&self.scoped(key))
    }

    /// Read and parse JSON under `key`. Malformed content reads as absent.
    pub fn read_json(&self, key: &str) -> Option<Value> {
        let text = self.read_text(key)?;
        let value = safe_parse(&text);
        if value.is_none() {
            debug!(key, "stored value is not valid JSON");
        }
        value
    }

    /// Serialize and write, swallowing any failure.
    ///
    /// Returns whether the value was stored.
    pub fn write_best_effort<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                warn!(key, error = %e, "skipping cache write: value did not serialize");
                return false;
            }
        };

        match self.write_with_eviction(key, &text) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "best-effort store write failed");
                false
            }
        }
    }

    /// Serialize and write, surfacing any failure.
    pub fn write_required<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.write_with_eviction(key, &text)
            .map_err(SwatchError::Storage)
    }

    /// Delete `key`.
    pub fn remove(&mut self, key: &str) {
        let scoped = self.scoped(key);
        self.inner.remove(&scoped);
    }

    /// Cache a thumbnail. Thumbnails are the first thing evicted when the
    /// store runs out of room.
    pub fn put_thumbnail(&mut self, entry_id: &str, data: &str) -> bool {
        let key = format!("{}{}", self.thumbnail_prefix, entry_id);
        match self.write_with_eviction(&key, data) {
            Ok(()) => true,
            Err(e) => {
                warn!(entry_id, error = %e, "thumbnail not cached");
                false
            }
        }
    }

    /// Read a cached thumbnail.
    pub fn thumbnail(&self, entry_id: &str) -> Option<String> {
        self.read_text(&format!("{}{}", self.thumbnail_prefix, entry_id))
    }

    /// Ids of all cached thumbnails, oldest first.
    pub fn thumbnail_ids(&self) -> Vec<String> {
        let prefix = self.scoped(&self.thumbnail_prefix);
        self.inner
            .keys_with_prefix(&prefix)
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    fn write_with_eviction(
        &mut self,
        key: &str,
        text: &str,
    ) -> std::result::Result<(), StoreError> {
        let scoped = self.scoped(key);
        let mut victims: Option<std::vec::IntoIter<String>> = None;

        loop {
            let err = match self.inner.set(&scoped, text) {
                Ok(()) => return Ok(()),
                Err(e) if e.is_quota() => e,
                Err(e) => return Err(e),
            };

            // Each thumbnail is tried at most once, so an adapter that
            // fails to delete cannot keep the loop alive.
            if victims.is_none() {
                victims = Some(self.evictable_thumbnails(&scoped).into_iter());
            }
            let Some(victim) = victims.as_mut().and_then(Iterator::next) else {
                return Err(err);
            };

            info!(key = %victim, "evicting cached thumbnail to free space");
            self.inner.remove(&victim);
            if self.inner.get(&victim).is_some() {
                warn!(key = %victim, "thumbnail survived eviction");
            }
        }
    }

    /// Scoped thumbnail keys other than `keep`, oldest first.
    fn evictable_thumbnails(&self, keep: &str) -> Vec<String> {
        let prefix = self.scoped(&self.thumbnail_prefix);
        self.inner
            .keys_with_prefix(&prefix)
            .into_iter()
            .filter(|key| key != keep)
            .collect()
    }
}
