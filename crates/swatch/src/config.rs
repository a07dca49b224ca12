//! Catalog configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwatchError};

/// Per-locator fetch timeout used when none is configured.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

/// Configuration for a [`Swatch`](crate::Swatch) instance.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes:
///
/// ```toml
/// remote_base_url = "https://design.example.com/app/"
/// fetch_timeout_ms = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwatchConfig {
    /// Prefix applied to every store key.
    pub namespace: String,

    /// Key of the cached resolved collection.
    pub cache_key: String,

    /// Key of the user-authored collection.
    pub user_key: String,

    /// Key prefix of evictable thumbnails.
    pub thumbnail_prefix: String,

    /// Ids starting with this prefix are builtins (excluded from exports by
    /// default).
    pub builtin_id_prefix: String,

    /// Base URL that relative remote locators resolve against. No remote
    /// stage runs without it unless a fetcher is wired explicitly.
    pub remote_base_url: Option<String>,

    /// Candidate locations of the remote catalog document, tried in order.
    pub remote_locators: Vec<String>,

    /// Per-locator fetch timeout.
    pub fetch_timeout_ms: u64,

    /// Capacity of the file store, in bytes.
    pub store_capacity_bytes: usize,

    /// How many import errors a preview shows before truncating.
    pub import_error_preview: usize,
}

impl Default for SwatchConfig {
    fn default() -> Self {
        Self {
            namespace: "swatch".to_string(),
            cache_key: "catalog.cache".to_string(),
            user_key: "catalog.user".to_string(),
            thumbnail_prefix: "thumbs.".to_string(),
            builtin_id_prefix: "builtin-".to_string(),
            remote_base_url: None,
            remote_locators: vec![
                "components.json".to_string(),
                "data/components.json".to_string(),
                "/data/components.json".to_string(),
            ],
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            store_capacity_bytes: crate::store::DEFAULT_FILE_CAPACITY,
            import_error_preview: 10,
        }
    }
}

impl SwatchConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SwatchConfig = toml::from_str(text)?;
        config.validated()
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SwatchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the remote base URL.
    pub fn with_remote_base_url(mut self, url: impl Into<String>) -> Self {
        self.remote_base_url = Some(url.into());
        self
    }

    /// Replace the remote locators.
    pub fn with_remote_locators(mut self, locators: Vec<String>) -> Self {
        self.remote_locators = locators;
        self
    }

    /// Set the per-locator fetch timeout. A zero duration restores the
    /// default.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Per-locator fetch timeout. Zero is treated as unset.
    pub fn fetch_timeout(&self) -> Duration {
        match self.fetch_timeout_ms {
            0 => Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }

    fn validated(self) -> Result<Self> {
        if self.namespace.trim().is_empty() {
            return Err(SwatchError::Config("namespace must not be empty".to_string()));
        }
        if self.cache_key == self.user_key {
            return Err(SwatchError::Config(format!(
                "cache_key and user_key must differ (both '{}')",
                self.cache_key
            )));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(SwatchError::Config("fetch_timeout_ms must be positive".to_string()));
        }
        Ok(self)
    }
}
