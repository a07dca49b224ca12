//! Resolution chain (loader).
//!
//! # Stages
//!
//! ```text
//! cache ──(empty/corrupt)──▶ remote locators ──(all failed)──▶ builtin
//!   │                          │                                │
//!   ▼                          ▼                                ▼
//! LoadResult(cache)    cache write +                    cache write +
//!                      LoadResult(remote)               LoadResult(builtin)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use swatch::loader::{ChainCapabilities, HttpFetcher, ResolutionChain};
//! use swatch::store::{CatalogStore, MemoryStore};
//! use swatch::SwatchConfig;
//!
//! # async fn example() -> swatch::Result<()> {
//! let config = SwatchConfig::new().with_remote_base_url("https://design.example.com/");
//! let fetcher = HttpFetcher::new(config.remote_base_url.as_deref(), config.fetch_timeout())?;
//! let chain = ResolutionChain::new(
//!     &config,
//!     ChainCapabilities::offline().with_fetcher(Arc::new(fetcher)),
//! );
//!
//! let mut store = CatalogStore::new(MemoryStore::new(), &config.namespace);
//! let result = chain.load(&mut store).await;
//! println!("{} entries from {}", result.count, result.source.label());
//! # Ok(())
//! # }
//! ```

mod builtin;
mod chain;
mod fetcher;
mod mock;
mod result;

pub use builtin::{builtin_document, builtin_entries, BUILTIN_DOCUMENT};
pub use chain::{ChainCapabilities, ResolutionChain};
pub use fetcher::{DocumentFetcher, HttpFetcher};
pub use mock::MockFetcher;
pub use result::{LoadResult, LoadSource};

pub(crate) use chain::entries_from_text;
