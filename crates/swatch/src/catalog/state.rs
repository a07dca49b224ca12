//! Read-only view of the live catalog.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::merge::merge;
use crate::model::Entry;

use super::counts::CatalogCounts;
use super::filter::{matches_query, EntryFilter};

/// A dependency that does not resolve to any entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenReference {
    /// Entry declaring the dependency.
    pub entry_id: String,
    /// The missing id.
    pub missing: String,
}

/// Snapshot of a resolved and merged collection.
///
/// Every query is a pure function of the snapshot. Lookups of unknown ids
/// return `None`; nothing here panics or mutates.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl CatalogState {
    /// Build a state from any collection of entries.
    ///
    /// `Entry` fields are public, so a caller can assemble one by hand with
    /// an empty id or name. Every entry is run through the normalizer again
    /// and repeated ids are merged (later wins), so the snapshot holds the
    /// same invariants as a resolved collection.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self::from_merged(merge([&entries]))
    }

    /// Build a state from the output of [`merge`], which is already
    /// normalized and duplicate-free.
    pub(crate) fn from_merged(entries: Vec<Entry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            index.entry(entry.id.clone()).or_insert(position);
        }
        Self { entries, index }
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counts(&self) -> CatalogCounts {
        CatalogCounts::from_entries(&self.entries)
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Free-text search.
    ///
    /// Matches case-insensitively against name, description, notes and
    /// tags. A blank query returns the full collection in order.
    pub fn search(&self, query: &str) -> Vec<&Entry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| matches_query(entry, &needle))
            .collect()
    }

    /// Entries satisfying a predicate, in order.
    pub fn filter<P>(&self, predicate: P) -> Vec<&Entry>
    where
        P: Fn(&Entry) -> bool,
    {
        self.entries.iter().filter(|entry| predicate(entry)).collect()
    }

    /// Entries matching a declarative filter, in order.
    pub fn filter_by(&self, filter: &EntryFilter) -> Vec<&Entry> {
        self.filter(|entry| filter.matches(entry))
    }

    /// Every distinct tag, sorted.
    pub fn tags(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|entry| entry.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Entries that list `id` as a dependency.
    pub fn dependents_of(&self, id: &str) -> Vec<&Entry> {
        self.filter(|entry| entry.dependencies.iter().any(|dep| dep == id))
    }

    /// Dependencies that name no entry in this catalog.
    pub fn broken_dependencies(&self) -> Vec<BrokenReference> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry
                    .dependencies
                    .iter()
                    .filter(|dep| !self.contains(dep))
                    .map(|dep| BrokenReference {
                        entry_id: entry.id.clone(),
                        missing: dep.clone(),
                    })
            })
            .collect()
    }
}

impl From<Vec<Entry>> for CatalogState {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{normalize, Level};
    use serde_json::json;

    fn state() -> CatalogState {
        let raw = [
            json!({"id": "btn", "name": "Button", "tags": ["form", "action"]}),
            json!({"id": "icon", "name": "Icon", "description": "SVG glyph", "tags": ["media"]}),
            json!({
                "id": "search",
                "name": "Search Bar",
                "level": "molecule",
                "dependencies": ["btn", "input"]
            }),
        ];
        CatalogState::new(raw.iter().filter_map(normalize).collect())
    }

    #[test]
    fn test_lookup() {
        let state = state();
        assert_eq!(state.get("icon").map(|e| e.name.as_str()), Some("Icon"));
        assert!(state.get("missing").is_none());
        assert!(state.get("").is_none());
    }

    #[test]
    fn test_search() {
        let state = state();
        let hits = state.search("but");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "btn");

        assert_eq!(state.search("glyph")[0].id, "icon");
        assert_eq!(state.search("MEDIA")[0].id, "icon");

        let all: Vec<&str> = state.search("   ").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(all, vec!["btn", "icon", "search"]);
    }

    #[test]
    fn test_filters() {
        let state = state();
        let atoms = state.filter(|e| e.level == Level::Atom);
        assert_eq!(atoms.len(), 2);

        let molecules = state.filter_by(&EntryFilter::new().with_level(Level::Molecule));
        assert_eq!(molecules[0].id, "search");
    }

    #[test]
    fn test_tags_and_dependencies() {
        let state = state();
        assert_eq!(state.tags(), vec!["action", "form", "media"]);
        assert_eq!(state.dependents_of("btn")[0].id, "search");
        assert!(state.dependents_of("icon").is_empty());
        assert_eq!(
            state.broken_dependencies(),
            vec![BrokenReference {
                entry_id: "search".to_string(),
                missing: "input".to_string(),
            }]
        );
    }

    #[test]
    fn test_hand_built_entries_are_repaired() {
        let mut blank = normalize(&json!({"id": "x", "name": "X"})).unwrap();
        blank.id = String::new();
        blank.name = "   ".to_string();
        let first = normalize(&json!({"id": "dup", "name": "First"})).unwrap();
        let second = normalize(&json!({"id": "dup", "name": "Second"})).unwrap();

        let state = CatalogState::new(vec![blank, first, second]);

        assert_eq!(state.len(), 2);
        assert!(state.entries().iter().all(|e| !e.id.is_empty()));
        assert!(state.entries().iter().all(|e| !e.name.trim().is_empty()));
        assert!(state.get("").is_none());
        assert_eq!(state.get("dup").map(|e| e.name.as_str()), Some("Second"));
    }

    #[test]
    fn test_empty_state() {
        let state = CatalogState::default();
        assert!(state.is_empty());
        assert_eq!(state.counts().total, 0);
        assert!(state.search("").is_empty());
    }
}
