//! Provenance-tagged outcome of a resolution.

use serde::{Deserialize, Serialize};

use crate::model::Entry;

/// Which stage of the chain produced a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSource {
    /// Previously persisted collection.
    Cache,
    /// Remote catalog document.
    Remote,
    /// Compiled-in fallback set.
    Builtin,
}

impl LoadSource {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            LoadSource::Cache => "cache",
            LoadSource::Remote => "remote",
            LoadSource::Builtin => "builtin",
        }
    }
}

/// Result of [`ResolutionChain::load`](super::ResolutionChain::load).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    pub entries: Vec<Entry>,
    pub source: LoadSource,
    pub count: usize,

    /// Locator that answered, for remote loads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,

    /// Set only when even the builtin set produced nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Whether this load wrote the collection to the cache.
    pub cached: bool,
}

impl LoadResult {
    /// A successful load.
    pub fn new(entries: Vec<Entry>, source: LoadSource) -> Self {
        Self {
            count: entries.len(),
            entries,
            source,
            locator: None,
            error: None,
            cached: false,
        }
    }

    /// The terminal "nothing usable anywhere" result.
    pub fn exhausted(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new(Vec::new(), LoadSource::Builtin)
        }
    }

    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    pub fn with_cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }

    /// Check if the presentation layer should show an empty/error state.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
