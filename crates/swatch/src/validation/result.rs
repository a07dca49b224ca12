//! Outcome of validating one candidate.

use serde::Serialize;

/// Pass/fail plus the itemized reasons for failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff `issues` is empty.
    pub is_valid: bool,
    /// One human-readable line per failed check.
    pub issues: Vec<String>,
}

impl ValidationResult {
    /// Build a result from collected issues.
    pub fn from_issues(issues: Vec<String>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// A passing result.
    pub fn valid() -> Self {
        Self::from_issues(Vec::new())
    }
}
