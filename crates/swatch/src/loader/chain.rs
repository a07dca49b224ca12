//! The cache → remote → builtin resolution chain.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::SwatchConfig;
use crate::input::{extract_entries, safe_parse, REMOTE_EXTRACTIONS};
use crate::merge::merge;
use crate::model::{normalize_all, Entry};
use crate::store::CatalogStore;

use super::builtin::builtin_document;
use super::fetcher::DocumentFetcher;
use super::result::{LoadResult, LoadSource};

/// Capabilities wired into a chain at construction.
///
/// A missing fetcher is a normal branch: the remote stage is skipped.
#[derive(Clone)]
pub struct ChainCapabilities {
    pub fetcher: Option<Arc<dyn DocumentFetcher>>,
    pub builtins: fn() -> &'static str,
}

impl ChainCapabilities {
    /// Builtins only, no remote stage.
    pub fn offline() -> Self {
        Self {
            fetcher: None,
            builtins: builtin_document,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_builtins(mut self, builtins: fn() -> &'static str) -> Self {
        self.builtins = builtins;
        self
    }
}

impl Default for ChainCapabilities {
    fn default() -> Self {
        Self::offline()
    }
}

/// Ordered, single-attempt-per-stage resolution of the catalog.
///
/// Each [`load`](Self::load) tries the cache, then each remote locator in
/// turn, then the builtin set. Stages never fail past their boundary; a
/// stage that yields nothing usable simply hands over to the next one.
pub struct ResolutionChain {
    cache_key: String,
    locators: Vec<String>,
    fetch_timeout: Duration,
    capabilities: ChainCapabilities,
}

impl ResolutionChain {
    /// Create a chain from configuration and capabilities.
    pub fn new(config: &SwatchConfig, capabilities: ChainCapabilities) -> Self {
        Self {
            cache_key: config.cache_key.clone(),
            locators: config.remote_locators.clone(),
            fetch_timeout: config.fetch_timeout(),
            capabilities,
        }
    }

    /// Replace the capabilities.
    pub fn set_capabilities(&mut self, capabilities: ChainCapabilities) {
        self.capabilities = capabilities;
    }

    pub fn capabilities(&self) -> &ChainCapabilities {
        &self.capabilities
    }

    /// Resolve the catalog. Never fails; see [`LoadResult`].
    pub async fn load(&self, store: &mut CatalogStore) -> LoadResult {
        if let Some(entries) = self.from_cache(store) {
            info!(count = entries.len(), "catalog resolved from cache");
            return LoadResult::new(entries, LoadSource::Cache);
        }

        if let Some((entries, locator)) = self.from_remote().await {
            let cached = store.write_best_effort(&self.cache_key, &entries);
            info!(count = entries.len(), %locator, cached, "catalog resolved from remote");
            return LoadResult::new(entries, LoadSource::Remote)
                .with_locator(locator)
                .with_cached(cached);
        }

        let entries = self.from_builtins();
        if entries.is_empty() {
            warn!("builtin catalog produced no usable entries");
            return LoadResult::exhausted(
                "No catalog could be loaded: cache, remote and builtin sources were all empty",
            );
        }

        let cached = store.write_best_effort(&self.cache_key, &entries);
        info!(count = entries.len(), cached, "catalog resolved from builtins");
        LoadResult::new(entries, LoadSource::Builtin).with_cached(cached)
    }

    fn from_cache(&self, store: &CatalogStore) -> Option<Vec<Entry>> {
        let document = store.read_json(&self.cache_key);
        let entries = document.and_then(|doc| entries_from_document(&doc));
        if entries.is_none() {
            debug!(key = %self.cache_key, "cache stage produced nothing");
        }
        entries
    }

    async fn from_remote(&self) -> Option<(Vec<Entry>, String)> {
        let Some(fetcher) = self.capabilities.fetcher.as_ref() else {
            debug!("no fetcher wired, skipping remote stage");
            return None;
        };

        for locator in &self.locators {
            let body = match tokio::time::timeout(self.fetch_timeout, fetcher.fetch(locator)).await
            {
                Ok(Ok(body)) => body,
                Ok(Err(e)) => {
                    debug!(%locator, fetcher = fetcher.name(), error = %e, "locator failed");
                    continue;
                }
                Err(_) => {
                    warn!(
                        %locator,
                        timeout_ms = self.fetch_timeout.as_millis() as u64,
                        "locator timed out"
                    );
                    continue;
                }
            };

            match entries_from_text(&body) {
                Some(entries) => return Some((entries, locator.clone())),
                None => debug!(%locator, "response held no usable entries"),
            }
        }

        None
    }

    fn from_builtins(&self) -> Vec<Entry> {
        entries_from_text((self.capabilities.builtins)()).unwrap_or_default()
    }
}

/// Parse text and extract a non-empty, de-duplicated entry collection.
pub(crate) fn entries_from_text(text: &str) -> Option<Vec<Entry>> {
    entries_from_document(&safe_parse(text)?)
}

fn entries_from_document(document: &serde_json::Value) -> Option<Vec<Entry>> {
    let (_, items) = extract_entries(document, REMOTE_EXTRACTIONS)?;
    let entries = merge([&normalize_all(&items)]);
    (!entries.is_empty()).then_some(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{builtin_entries, MockFetcher};
    use crate::store::{MemoryStore, StoreAdapter};
    use serde_json::json;

    fn store() -> CatalogStore {
        CatalogStore::new(MemoryStore::new(), "swatch")
    }

    fn chain(capabilities: ChainCapabilities) -> ResolutionChain {
        let config = SwatchConfig::new()
            .with_remote_locators(vec!["a.json".to_string(), "b.json".to_string()])
            .with_fetch_timeout(Duration::from_millis(200));
        ResolutionChain::new(&config, capabilities)
    }

    #[test]
    fn test_entries_from_text() {
        assert!(entries_from_text("").is_none());
        assert!(entries_from_text("[]").is_none());
        assert!(entries_from_text("[1, 2]").is_none());
        assert!(entries_from_text("{\"other\": [{}]}").is_none());

        let entries = entries_from_text(r#"{"data": [{"id": "a"}, {"id": "a", "name": "A"}]}"#)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "A");
    }

    #[tokio::test]
    async fn test_builtin_fallback_populates_cache() {
        let mut store = store();
        let result = chain(ChainCapabilities::offline()).load(&mut store).await;

        assert_eq!(result.source, LoadSource::Builtin);
        assert_eq!(result.count, builtin_entries().len());
        assert!(result.cached);
        assert!(result.error.is_none());
        assert!(store.read_json("catalog.cache").is_some());
    }

    #[tokio::test]
    async fn test_cache_hit_skips_remote() {
        let mut store = store();
        store.write_best_effort("catalog.cache", &json!([{"id": "cached", "name": "Cached"}]));

        let mock = Arc::new(MockFetcher::new().with_body("a.json", "[{\"id\": \"r\"}]"));
        let result = chain(ChainCapabilities::offline().with_fetcher(mock.clone()))
            .load(&mut store)
            .await;

        assert_eq!(result.source, LoadSource::Cache);
        assert_eq!(result.entries[0].id, "cached");
        assert!(!result.cached);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_cache_falls_through() {
        let mut adapter = MemoryStore::new();
        adapter.set("swatch:catalog.cache", "[not json").unwrap();
        let mut store = CatalogStore::new(adapter, "swatch");

        let result = chain(ChainCapabilities::offline()).load(&mut store).await;
        assert_eq!(result.source, LoadSource::Builtin);
    }

    #[tokio::test]
    async fn test_remote_tries_locators_in_order() {
        let mock = Arc::new(
            MockFetcher::new()
                .with_body("a.json", "<html>not found</html>")
                .with_body("b.json", r#"{"components": [{"id": "r1", "name": "Remote"}]}"#),
        );
        let mut store = store();
        let result = chain(ChainCapabilities::offline().with_fetcher(mock.clone()))
            .load(&mut store)
            .await;

        assert_eq!(result.source, LoadSource::Remote);
        assert_eq!(result.locator.as_deref(), Some("b.json"));
        assert_eq!(result.count, 1);
        assert_eq!(mock.calls(), vec!["a.json", "b.json"]);

        let cached = store.read_json("catalog.cache").unwrap();
        assert_eq!(cached[0]["id"], "r1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_locator_times_out() {
        let mock = Arc::new(
            MockFetcher::new()
                .with_delay("a.json", Duration::from_secs(60), "[{\"id\": \"slow\"}]")
                .with_body("b.json", "[{\"id\": \"fast\"}]"),
        );
        let mut store = store();
        let result = chain(ChainCapabilities::offline().with_fetcher(mock))
            .load(&mut store)
            .await;

        assert_eq!(result.source, LoadSource::Remote);
        assert_eq!(result.entries[0].id, "fast");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_config_still_reaches_remote() {
        let config = SwatchConfig::new()
            .with_remote_locators(vec!["a.json".to_string()])
            .with_fetch_timeout(Duration::ZERO);
        let mock = Arc::new(MockFetcher::new().with_delay(
            "a.json",
            Duration::from_millis(50),
            "[{\"id\": \"remote\"}]",
        ));
        let chain = ResolutionChain::new(&config, ChainCapabilities::offline().with_fetcher(mock));

        let result = chain.load(&mut store()).await;

        assert_eq!(result.source, LoadSource::Remote);
        assert_eq!(result.entries[0].id, "remote");
    }

    #[tokio::test]
    async fn test_exhausted_when_builtins_empty() {
        let mut store = store();
        let result = chain(ChainCapabilities::offline().with_builtins(|| "[]"))
            .load(&mut store)
            .await;

        assert_eq!(result.source, LoadSource::Builtin);
        assert_eq!(result.count, 0);
        assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
        assert!(store.read_text("catalog.cache").is_none());
    }

    #[tokio::test]
    async fn test_cache_write_failure_is_swallowed() {
        let mut store = CatalogStore::new(MemoryStore::with_capacity(32), "swatch");
        let result = chain(ChainCapabilities::offline()).load(&mut store).await;

        assert_eq!(result.source, LoadSource::Builtin);
        assert!(!result.cached);
        assert_eq!(result.count, builtin_entries().len());
    }
}
