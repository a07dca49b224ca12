//! Declarative entry filters.

use crate::model::{Entry, Level, Status};

/// A conjunction of optional criteria. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    pub level: Option<Level>,
    pub status: Option<Status>,
    pub tag: Option<String>,
    pub query: Option<String>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Check if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.status.is_none() && self.tag.is_none() && self.query.is_none()
    }

    /// Check an entry against every set criterion.
    pub fn matches(&self, entry: &Entry) -> bool {
        if self.level.is_some_and(|level| entry.level != level) {
            return false;
        }
        if self.status.is_some_and(|status| entry.status != status) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !entry.has_tag(tag) {
                return false;
            }
        }
        match &self.query {
            Some(query) => matches_query(entry, &query.trim().to_lowercase()),
            None => true,
        }
    }
}

/// Case-insensitive substring match over name, description, notes and
/// tags. `needle` must already be trimmed and lowercased; empty matches.
pub(crate) fn matches_query(entry: &Entry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let contains = |text: &str| text.to_lowercase().contains(needle);

    contains(&entry.name)
        || entry.description.as_deref().is_some_and(contains)
        || entry.notes.as_deref().is_some_and(contains)
        || entry.tags.iter().any(|tag| contains(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::normalize;
    use serde_json::json;

    fn button() -> Entry {
        normalize(&json!({
            "id": "btn",
            "name": "Button",
            "level": "atom",
            "status": "ready",
            "tags": ["Form", "action"],
            "notes": "Primary call to action"
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_filter_matches() {
        let filter = EntryFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&button()));
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let entry = button();
        assert!(EntryFilter::new().with_level(Level::Atom).with_tag("form").matches(&entry));
        assert!(
            !EntryFilter::new()
                .with_level(Level::Atom)
                .with_status(Status::Draft)
                .matches(&entry)
        );
        assert!(!EntryFilter::new().with_tag("layout").matches(&entry));
    }

    #[test]
    fn test_query_fields() {
        let entry = button();
        assert!(matches_query(&entry, "butt"));
        assert!(matches_query(&entry, "call to"));
        assert!(matches_query(&entry, "form"));
        assert!(!matches_query(&entry, "modal"));
        assert!(EntryFilter::new().with_query("  ACTION ").matches(&entry));
    }
}
