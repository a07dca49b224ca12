//! Catalog state facade.
//!
//! Read-only aggregation over the live, merged collection: counts, lookup,
//! search, and filtering.

mod counts;
mod filter;
mod state;

pub use counts::{CatalogCounts, LevelCounts, StatusCounts};
pub use filter::EntryFilter;
pub use state::{BrokenReference, CatalogState};
