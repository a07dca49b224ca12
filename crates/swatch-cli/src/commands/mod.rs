//! CLI command implementations.

pub mod clear_cache;
pub mod export;
pub mod import;
pub mod list;
pub mod load;
pub mod remove;
pub mod show;
pub mod stats;

use std::path::PathBuf;

use colored::{ColoredString, Colorize};
use swatch::loader::HttpFetcher;
use swatch::store::FileStore;
use swatch::{Entry, Status, Swatch, SwatchConfig};
use tracing::debug;

/// Flags shared by every command.
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub store_dir: PathBuf,
    pub remote: Option<String>,
    pub verbose: bool,
}

impl GlobalOptions {
    /// Resolve the configuration: file first, then flag overrides.
    pub fn config(&self) -> Result<SwatchConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => SwatchConfig::load(path)?,
            None => SwatchConfig::new(),
        };
        if let Some(remote) = &self.remote {
            config = config.with_remote_base_url(remote.clone());
        }
        Ok(config)
    }

    /// Open the engine over the file store. Nothing is loaded yet.
    pub fn open(&self) -> Result<Swatch, Box<dyn std::error::Error>> {
        let config = self.config()?;
        debug!(
            store = %self.store_dir.display(),
            remote = ?config.remote_base_url,
            "opening catalog"
        );
        let store = FileStore::with_capacity(&self.store_dir, config.store_capacity_bytes);

        let fetcher = match config.remote_base_url.as_deref() {
            Some(base) => Some(HttpFetcher::new(Some(base), config.fetch_timeout())?),
            None => None,
        };

        let swatch = Swatch::new(config, store);
        Ok(match fetcher {
            Some(fetcher) => swatch.with_fetcher(fetcher),
            None => swatch,
        })
    }
}

pub(crate) fn status_label(entry: &Entry) -> ColoredString {
    match entry.status {
        Status::Ready => entry.status.label().green(),
        Status::Draft => entry.status.label().yellow(),
    }
}
