//! Main Swatch struct and public API.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::catalog::CatalogState;
use crate::config::SwatchConfig;
use crate::error::{Result, SwatchError};
use crate::events::{CatalogEvent, EventSink, TracingSink};
use crate::exchange::{build_export, parse_import, ExportDocument, ExportOptions, ImportResult};
use crate::loader::{
    entries_from_text, ChainCapabilities, DocumentFetcher, LoadResult, LoadSource, ResolutionChain,
};
use crate::merge::{merge, merge_with_report};
use crate::model::{normalize, Entry};
use crate::store::{CatalogStore, StoreAdapter};

/// The catalog engine.
///
/// Owns the store, the resolution chain and the live [`CatalogState`].
/// The state is rebuilt after every load and every user write, and is
/// only reachable through [`state`](Self::state).
pub struct Swatch {
    config: SwatchConfig,
    store: CatalogStore,
    chain: ResolutionChain,
    events: Arc<dyn EventSink>,
    state: CatalogState,
    last_load: Option<LoadResult>,
}

impl Swatch {
    /// Create an engine over a store adapter.
    ///
    /// No remote stage runs until a fetcher is added with
    /// [`with_fetcher`](Self::with_fetcher).
    pub fn new(config: SwatchConfig, adapter: impl StoreAdapter + 'static) -> Self {
        let store = CatalogStore::new(adapter, config.namespace.clone())
            .with_thumbnail_prefix(config.thumbnail_prefix.clone());
        let chain = ResolutionChain::new(&config, ChainCapabilities::offline());

        Self {
            config,
            store,
            chain,
            events: Arc::new(TracingSink),
            state: CatalogState::default(),
            last_load: None,
        }
    }

    /// Enable the remote stage.
    pub fn with_fetcher(self, fetcher: impl DocumentFetcher + 'static) -> Self {
        self.with_shared_fetcher(Arc::new(fetcher))
    }

    /// Enable the remote stage with a fetcher the caller keeps a handle to.
    pub fn with_shared_fetcher(mut self, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        let capabilities = self.chain.capabilities().clone().with_fetcher(fetcher);
        self.chain.set_capabilities(capabilities);
        self
    }

    /// Replace the builtin document source.
    pub fn with_builtins(mut self, builtins: fn() -> &'static str) -> Self {
        let capabilities = self.chain.capabilities().clone().with_builtins(builtins);
        self.chain.set_capabilities(capabilities);
        self
    }

    /// Send diagnostic events to `sink` instead of the log.
    pub fn with_events(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    pub fn config(&self) -> &SwatchConfig {
        &self.config
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// The live catalog.
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Outcome of the most recent [`load`](Self::load), if any.
    pub fn last_load(&self) -> Option<&LoadResult> {
        self.last_load.as_ref()
    }

    /// Resolve the catalog and merge the user collection over it.
    pub async fn load(&mut self) -> &LoadResult {
        let result = self.chain.load(&mut self.store).await;

        if result.cached && result.source != LoadSource::Cache {
            self.emit(CatalogEvent::CachePopulated {
                source: result.source,
                count: result.count,
                timestamp: Utc::now(),
            });
        }

        let user = self.user_entries();
        let report = merge_with_report([&result.entries, &user]);
        info!(
            resolved = result.count,
            user = user.len(),
            total = report.entries.len(),
            "catalog loaded"
        );

        self.emit(CatalogEvent::MergeCompleted {
            collections: report.collections,
            count: report.entries.len(),
            replaced: report.replaced,
            timestamp: Utc::now(),
        });
        self.state = CatalogState::from_merged(report.entries);

        self.last_load.insert(result)
    }

    /// The user-authored collection as currently stored.
    pub fn user_entries(&self) -> Vec<Entry> {
        self.store
            .read_text(&self.config.user_key)
            .and_then(|text| entries_from_text(&text))
            .unwrap_or_default()
    }

    /// Normalize a candidate and save it into the user collection,
    /// replacing any user entry with the same id.
    ///
    /// Storage failures are returned, not swallowed.
    pub fn save_entry(&mut self, raw: &Value) -> Result<Entry> {
        let entry = normalize(raw).ok_or_else(|| {
            SwatchError::InvalidEntry("a component must be a JSON object".to_string())
        })?;

        let user = self.user_entries();
        let merged = merge([user.as_slice(), std::slice::from_ref(&entry)]);
        self.store.write_required(&self.config.user_key, &merged)?;
        debug!(id = %entry.id, "user entry saved");

        self.emit(CatalogEvent::EntrySaved {
            id: entry.id.clone(),
            timestamp: Utc::now(),
        });
        self.refresh_state(merged);
        Ok(entry)
    }

    /// Remove a user entry. Returns false when no user entry has `id`.
    ///
    /// Builtin and remote entries cannot be removed; they come back on the
    /// next load.
    pub fn remove_entry(&mut self, id: &str) -> Result<bool> {
        let user = self.user_entries();
        if !user.iter().any(|entry| entry.id == id) {
            return Ok(false);
        }

        let remaining: Vec<Entry> = user.into_iter().filter(|entry| entry.id != id).collect();
        self.store.write_required(&self.config.user_key, &remaining)?;

        self.emit(CatalogEvent::EntryRemoved {
            id: id.to_string(),
            timestamp: Utc::now(),
        });
        self.refresh_state(remaining);
        Ok(true)
    }

    /// Parse an import file into a preview. Nothing is written.
    pub fn preview_import(&self, text: &str) -> ImportResult {
        let result = parse_import(text);
        self.emit(CatalogEvent::ImportParsed {
            total: result.summary.total,
            valid: result.summary.valid,
            invalid: result.summary.invalid,
            skipped: result.summary.skipped,
            timestamp: Utc::now(),
        });
        result
    }

    /// Save the entries of a previewed import into the user collection.
    ///
    /// Imported entries replace user entries with the same id. Returns the
    /// number of entries applied.
    pub fn apply_import(&mut self, import: &ImportResult) -> Result<usize> {
        if !import.is_valid || import.entries.is_empty() {
            return Err(SwatchError::Import(
                "the import holds no valid components".to_string(),
            ));
        }

        let user = self.user_entries();
        let merged = merge([&user, &import.entries]);
        self.store.write_required(&self.config.user_key, &merged)?;

        let count = import.entries.len();
        info!(count, "import applied");
        self.emit(CatalogEvent::ImportApplied {
            count,
            timestamp: Utc::now(),
        });
        self.refresh_state(merged);
        Ok(count)
    }

    /// Build an export of the live catalog.
    ///
    /// The builtin prefix always comes from configuration.
    pub fn export(&self, options: &ExportOptions) -> ExportDocument {
        let options = options
            .clone()
            .with_builtin_prefix(self.config.builtin_id_prefix.clone());
        let document = build_export(self.state.entries(), &options);

        self.emit(CatalogEvent::ExportBuilt {
            count: document.components.len(),
            include_builtins: options.include_builtins,
            timestamp: Utc::now(),
        });
        document
    }

    /// Cache a rendered thumbnail. Best-effort; returns whether it was
    /// stored.
    pub fn cache_thumbnail(&mut self, id: &str, data: &str) -> bool {
        self.store.put_thumbnail(id, data)
    }

    pub fn thumbnail(&self, id: &str) -> Option<String> {
        self.store.thumbnail(id)
    }

    /// Drop the cached collection and every thumbnail. The user collection
    /// is kept. Returns the number of thumbnails removed.
    pub fn clear_cache(&mut self) -> usize {
        self.store.remove(&self.config.cache_key);

        let thumbnails = self.store.thumbnail_ids();
        for id in &thumbnails {
            let key = format!("{}{}", self.config.thumbnail_prefix, id);
            self.store.remove(&key);
        }
        info!(thumbnails = thumbnails.len(), "cache cleared");
        thumbnails.len()
    }

    fn refresh_state(&mut self, user: Vec<Entry>) {
        let resolved = self
            .last_load
            .as_ref()
            .map(|result| result.entries.as_slice())
            .unwrap_or_default();
        self.state = CatalogState::from_merged(merge([resolved, user.as_slice()]));
    }

    fn emit(&self, event: CatalogEvent) {
        self.events.emit(&event);
    }
}
