//! Export documents.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::catalog::{CatalogCounts, LevelCounts, StatusCounts};
use crate::error::Result;
use crate::merge::merge;
use crate::model::Entry;

/// Version of the export document layout.
pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";

/// Prefix marking builtin entry ids, unless configured otherwise.
pub const DEFAULT_BUILTIN_PREFIX: &str = "builtin-";

/// What to include in an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Keep entries whose id carries the builtin prefix.
    pub include_builtins: bool,
    /// Attach a [`ExportMetadata`] block.
    pub include_metadata: bool,
    /// Id prefix that marks builtin entries.
    pub builtin_prefix: String,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins(mut self, include: bool) -> Self {
        self.include_builtins = include;
        self
    }

    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    pub fn with_builtin_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.builtin_prefix = prefix.into();
        self
    }

    /// Check if an id belongs to the compiled-in set. An empty prefix
    /// marks nothing as builtin.
    pub fn is_builtin_id(&self, id: &str) -> bool {
        !self.builtin_prefix.is_empty() && id.starts_with(&self.builtin_prefix)
    }

    fn keeps(&self, entry: &Entry) -> bool {
        self.include_builtins || !self.is_builtin_id(&entry.id)
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_builtins: false,
            include_metadata: true,
            builtin_prefix: DEFAULT_BUILTIN_PREFIX.to_string(),
        }
    }
}

/// Descriptive block attached to an export. Never re-validated on import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub exported_at: DateTime<Utc>,
    pub total: usize,
    pub by_level: LevelCounts,
    pub by_status: StatusCounts,
    pub format_version: String,
    pub generator: String,
    /// `sha256:<hex>` of the serialized components array.
    pub checksum: String,
}

/// The export artifact: `{ "components": [...], "metadata": {...}? }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub components: Vec<Entry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExportMetadata>,
}

impl ExportDocument {
    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build an export from a collection, stamped with the current time.
pub fn build_export(entries: &[Entry], options: &ExportOptions) -> ExportDocument {
    build_export_at(entries, options, Utc::now())
}

/// [`build_export`] with an explicit timestamp.
pub fn build_export_at(
    entries: &[Entry],
    options: &ExportOptions,
    now: DateTime<Utc>,
) -> ExportDocument {
    let kept: Vec<&Entry> = entries.iter().filter(|entry| options.keeps(entry)).collect();
    let components = merge([kept]);

    let metadata = options.include_metadata.then(|| {
        let counts = CatalogCounts::from_entries(&components);
        ExportMetadata {
            exported_at: now,
            total: counts.total,
            by_level: counts.by_level,
            by_status: counts.by_status,
            format_version: EXPORT_FORMAT_VERSION.to_string(),
            generator: format!("swatch {}", env!("CARGO_PKG_VERSION")),
            checksum: checksum(&components),
        }
    });

    ExportDocument {
        components,
        metadata,
    }
}

/// Suggested download name, e.g. `swatch-export-20250301-142530.json`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("swatch-export-{}.json", now.format("%Y%m%d-%H%M%S"))
}

fn checksum(components: &[Entry]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(components).unwrap_or_default());
    format!("sha256:{:x}", hasher.finalize())
}
