//! Merge/dedup engine.
//!
//! Collections are combined by id. The first time an id is seen it takes
//! the next position in the output; when it appears again (in a later
//! collection, or later in the same one) the newer entry replaces the
//! value at that position. Passing builtins before user entries therefore
//! lets a user entry override a builtin without reordering the list.

use indexmap::IndexMap;
use serde_json::Value;

use crate::model::{normalize, Entry};

/// Outcome of a merge, with counts for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Duplicate-free entries in first-seen order.
    pub entries: Vec<Entry>,
    /// How many candidates replaced an earlier entry with the same id.
    pub replaced: usize,
    /// How many raw candidates the normalizer rejected.
    pub dropped: usize,
    /// How many collections were merged.
    pub collections: usize,
}

/// Merge collections of entries, later collections winning.
pub fn merge<'a, I, C>(collections: I) -> Vec<Entry>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = &'a Entry>,
{
    merge_with_report(collections).entries
}

/// [`merge`], also reporting how many entries were replaced.
pub fn merge_with_report<'a, I, C>(collections: I) -> MergeReport
where
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = &'a Entry>,
{
    let mut merger = Merger::default();
    for collection in collections {
        merger.collections += 1;
        for entry in collection {
            merger.insert(entry.renormalized());
        }
    }
    merger.finish()
}

/// Merge collections of raw candidates, normalizing each first.
pub fn merge_values<'a, I, C>(collections: I) -> MergeReport
where
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = &'a Value>,
{
    let mut merger = Merger::default();
    for collection in collections {
        merger.collections += 1;
        for raw in collection {
            match normalize(raw) {
                Some(entry) => merger.insert(entry),
                None => merger.dropped += 1,
            }
        }
    }
    merger.finish()
}

#[derive(Default)]
struct Merger {
    by_id: IndexMap<String, Entry>,
    replaced: usize,
    dropped: usize,
    collections: usize,
}

impl Merger {
    fn insert(&mut self, entry: Entry) {
        match self.by_id.get_mut(&entry.id) {
            Some(slot) => {
                *slot = entry;
                self.replaced += 1;
            }
            None => {
                self.by_id.insert(entry.id.clone(), entry);
            }
        }
    }

    fn finish(self) -> MergeReport {
        MergeReport {
            entries: self.by_id.into_values().collect(),
            replaced: self.replaced,
            dropped: self.dropped,
            collections: self.collections,
        }
    }
}
