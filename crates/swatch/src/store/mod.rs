//! Persistent store adapter and the engine's namespaced view of it.
//!
//! The medium itself is an external collaborator; the engine only needs the
//! small synchronous surface of [`StoreAdapter`]. Two adapters ship with the
//! crate: [`MemoryStore`] for tests and embedding, and [`FileStore`] for the
//! CLI.

mod adapter;
mod catalog_store;
mod file;
mod memory;

pub use adapter::{StoreAdapter, StoreError};
pub use catalog_store::CatalogStore;
pub use file::{FileStore, DEFAULT_FILE_CAPACITY};
pub use memory::MemoryStore;
