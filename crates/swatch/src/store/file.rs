//! Directory-backed store - one file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use super::adapter::{StoreAdapter, StoreError};

const FILE_EXTENSION: &str = "json";

/// Default capacity, in the same range as browser local storage.
pub const DEFAULT_FILE_CAPACITY: usize = 5 * 1024 * 1024;

/// Store that keeps each key in its own file under a directory.
///
/// Keys are percent-encoded into file names with `urlencoding`, so any key
/// round-trips and none can escape the directory. The capacity bounds the
/// total size of the values on disk.
///
/// # Example
///
/// ```text
/// .swatch/
/// ├── swatch%3Acatalog.cache.json
/// └── swatch%3Acatalog.user.json
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    capacity: usize,
}

impl FileStore {
    /// Create a store rooted at `dir` with the default capacity.
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_capacity(dir, DEFAULT_FILE_CAPACITY)
    }

    /// Create a store rooted at `dir` holding at most `capacity` bytes.
    pub fn with_capacity(dir: impl AsRef<Path>, capacity: usize) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            capacity,
        }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", urlencoding::encode(key), FILE_EXTENSION))
    }

    /// All stored keys with their modification time and size.
    fn scan(&self) -> Vec<(String, SystemTime, u64)> {
        let Ok(read_dir) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        read_dir
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != FILE_EXTENSION) {
                    return None;
                }
                let stem = path.file_stem()?.to_string_lossy().into_owned();
                let key = urlencoding::decode(&stem).ok()?.into_owned();
                let metadata = entry.metadata().ok()?;
                let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                Some((key, modified, metadata.len()))
            })
            .collect()
    }
}

impl StoreAdapter for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let used: u64 = self
            .scan()
            .into_iter()
            .filter(|(k, _, _)| k != key)
            .map(|(_, _, size)| size)
            .sum();
        let available = self.capacity.saturating_sub(used as usize);

        if value.len() > available {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                needed: value.len(),
                available,
            });
        }

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            key: key.to_string(),
            message: format!("Failed to create directory '{}': {}", self.dir.display(), e),
        })?;

        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| StoreError::Io {
            key: key.to_string(),
            message: format!("Failed to write '{}': {}", path.display(), e),
        })
    }

    fn remove(&mut self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != ErrorKind::NotFound {
                debug!(path = %path.display(), error = %e, "failed to remove store file");
            }
        }
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<_> = self
            .scan()
            .into_iter()
            .filter(|(key, _, _)| key.starts_with(prefix))
            .collect();

        // Oldest first, ties broken by key for a stable order.
        keys.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        keys.into_iter().map(|(key, _, _)| key).collect()
    }
}
