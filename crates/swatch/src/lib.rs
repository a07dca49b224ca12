//! Swatch: a catalog engine for design-system components.
//!
//! Swatch keeps a catalog of reusable UI components (atoms, molecules,
//! organisms) usable when the network, the store, or the input data
//! misbehave.
//!
//! # Core Principles
//!
//! - **Coerce, don't reject**: arbitrary JSON is normalized into canonical
//!   entries; only non-objects are dropped
//! - **Degrade gracefully**: loading falls back from cache to remote to a
//!   compiled-in builtin set, and never fails
//! - **Report precisely**: imports are validated candidate by candidate, so
//!   a partial success says exactly what was left out
//!
//! # Example
//!
//! ```no_run
//! use swatch::store::FileStore;
//! use swatch::{Swatch, SwatchConfig};
//!
//! # async fn example() {
//! let mut swatch = Swatch::new(SwatchConfig::new(), FileStore::new(".swatch"));
//! let result = swatch.load().await;
//! println!("Loaded {} components from {}", result.count, result.source.label());
//!
//! for entry in swatch.state().search("button") {
//!     println!("{} ({})", entry.name, entry.level.label());
//! }
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod exchange;
pub mod input;
pub mod loader;
pub mod merge;
pub mod model;
pub mod store;
pub mod validation;

mod swatch;

pub use crate::swatch::Swatch;
pub use catalog::{CatalogCounts, CatalogState, EntryFilter};
pub use config::SwatchConfig;
pub use error::{Result, SwatchError};
pub use exchange::{build_export, parse_import, ExportDocument, ExportOptions, ImportResult};
pub use loader::{LoadResult, LoadSource, MockFetcher};
pub use merge::merge;
pub use model::{normalize, Entry, Level, Status};
pub use validation::{validate, ValidationResult};
