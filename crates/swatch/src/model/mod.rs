//! Entity model and normalizer.
//!
//! [`Entry`] is the canonical unit of the catalog. The only way to build one
//! from external data is [`normalize`], which repairs what it can and
//! rejects only non-object input.

mod entry;
mod normalize;

pub use entry::{Demo, Entry, Level, PropKind, PropertySpec, Status};
pub use normalize::{normalize, normalize_all, normalize_prop, DEFAULT_VERSION};

pub(crate) use normalize::scalar_text;
