//! Diagnostic events emitted by the engine.
//!
//! Events are fire-and-forget notifications for telemetry collaborators.
//! Delivery never fails and never affects the operation that emitted it.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::loader::LoadSource;

/// Catalog event types.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    /// A remote or builtin collection was written to the cache.
    CachePopulated {
        source: LoadSource,
        count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Resolved and user collections were merged into the live catalog.
    MergeCompleted {
        collections: usize,
        count: usize,
        replaced: usize,
        timestamp: DateTime<Utc>,
    },

    /// An import file was parsed into a preview.
    ImportParsed {
        total: usize,
        valid: usize,
        invalid: usize,
        skipped: usize,
        timestamp: DateTime<Utc>,
    },

    /// Previewed import entries were saved to the user collection.
    ImportApplied {
        count: usize,
        timestamp: DateTime<Utc>,
    },

    /// An export document was built.
    ExportBuilt {
        count: usize,
        include_builtins: bool,
        timestamp: DateTime<Utc>,
    },

    /// A user entry was created or replaced.
    EntrySaved {
        id: String,
        timestamp: DateTime<Utc>,
    },

    /// A user entry was removed.
    EntryRemoved {
        id: String,
        timestamp: DateTime<Utc>,
    },
}

impl CatalogEvent {
    /// Snake-case event name.
    pub fn name(&self) -> &'static str {
        match self {
            CatalogEvent::CachePopulated { .. } => "cache_populated",
            CatalogEvent::MergeCompleted { .. } => "merge_completed",
            CatalogEvent::ImportParsed { .. } => "import_parsed",
            CatalogEvent::ImportApplied { .. } => "import_applied",
            CatalogEvent::ExportBuilt { .. } => "export_built",
            CatalogEvent::EntrySaved { .. } => "entry_saved",
            CatalogEvent::EntryRemoved { .. } => "entry_removed",
        }
    }
}

/// Receiver of catalog events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &CatalogEvent);
}

/// Sink that writes events to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &CatalogEvent) {
        let payload = serde_json::to_string(event).unwrap_or_default();
        info!(target: "swatch::events", event = event.name(), %payload, "catalog event");
    }
}

/// Sink that keeps every event in memory, for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CatalogEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<CatalogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Names of the recorded events, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(CatalogEvent::name).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &CatalogEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
