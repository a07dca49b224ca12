//! Aggregate counts over a collection.

use serde::{Deserialize, Serialize};

use crate::model::{Entry, Level, Status};

/// Counts of entries by level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub atom: usize,
    pub molecule: usize,
    pub organism: usize,
}

impl LevelCounts {
    /// Count for one level.
    pub fn get(&self, level: Level) -> usize {
        match level {
            Level::Atom => self.atom,
            Level::Molecule => self.molecule,
            Level::Organism => self.organism,
        }
    }

    fn record(&mut self, level: Level) {
        match level {
            Level::Atom => self.atom += 1,
            Level::Molecule => self.molecule += 1,
            Level::Organism => self.organism += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.atom + self.molecule + self.organism
    }
}

/// Counts of entries by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub draft: usize,
    pub ready: usize,
}

impl StatusCounts {
    /// Count for one status.
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Draft => self.draft,
            Status::Ready => self.ready,
        }
    }

    fn record(&mut self, status: Status) {
        match status {
            Status::Draft => self.draft += 1,
            Status::Ready => self.ready += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.draft + self.ready
    }
}

/// Totals for a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCounts {
    pub total: usize,
    pub by_level: LevelCounts,
    pub by_status: StatusCounts,
}

impl CatalogCounts {
    /// Count a collection.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        let mut counts = Self::default();
        for entry in entries {
            counts.total += 1;
            counts.by_level.record(entry.level);
            counts.by_status.record(entry.status);
        }
        counts
    }
}
