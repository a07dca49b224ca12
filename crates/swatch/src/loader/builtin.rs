//! Compiled-in fallback catalog.

use crate::model::Entry;

use super::chain::entries_from_text;

/// The builtin catalog document, embedded at compile time.
pub const BUILTIN_DOCUMENT: &str = include_str!("../../data/builtin_components.json");

/// Source of the builtin document (the default chain capability).
pub fn builtin_document() -> &'static str {
    BUILTIN_DOCUMENT
}

/// The builtin catalog, normalized.
pub fn builtin_entries() -> Vec<Entry> {
    entries_from_text(BUILTIN_DOCUMENT).unwrap_or_default()
}
