//! Import preview: parse, validate and summarize a user-supplied file.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::input::{extract_entries, safe_parse, Extraction, IMPORT_EXTRACTIONS};
use crate::model::{normalize, scalar_text, Entry};
use crate::validation::{lint, validate};

/// Per-candidate tallies for an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Candidates found in the document.
    pub total: usize,
    /// Candidates that passed validation and were kept.
    pub valid: usize,
    /// Candidates that failed validation.
    pub invalid: usize,
    /// Valid candidates whose id already appeared earlier in the document.
    pub skipped: usize,
}

/// Outcome of [`parse_import`].
///
/// `is_valid` is true iff at least one candidate validated, so a file where
/// every element fails is distinguishable from a partial success.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub is_valid: bool,
    pub entries: Vec<Entry>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: ImportSummary,
}

impl ImportResult {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
            ..Self::default()
        }
    }

    /// The first `limit` errors, plus a trailing "... and K more" line when
    /// some were left out.
    pub fn error_preview(&self, limit: usize) -> Vec<String> {
        let mut preview: Vec<String> = self.errors.iter().take(limit).cloned().collect();
        let hidden = self.errors.len().saturating_sub(limit);
        if hidden > 0 {
            preview.push(format!("... and {} more", hidden));
        }
        preview
    }
}

/// Parse an import file into a preview of what would be saved.
///
/// Never fails: malformed text, unrecognized layouts and invalid
/// candidates are all reported through [`ImportResult::errors`].
pub fn parse_import(text: &str) -> ImportResult {
    if text.trim().is_empty() {
        return ImportResult::failed("Import file is empty");
    }

    let Some(document) = safe_parse(text) else {
        return ImportResult::failed("Import file is not valid JSON");
    };

    let Some((strategy, candidates)) = extract_entries(&document, IMPORT_EXTRACTIONS) else {
        return ImportResult::failed(
            "No component array found: expected an array, or an object with \
             'components', 'items', 'catalog' or 'data'",
        );
    };
    debug!(
        strategy = %strategy.label(),
        candidates = candidates.len(),
        "import document recognized"
    );

    let mut result = ImportResult::default();
    if strategy == Extraction::SingleEntry {
        result.warnings.push(
            "File holds a single component object; importing it as a one-entry list".to_string(),
        );
    }

    if candidates.is_empty() {
        result.errors.push("Component array is empty".to_string());
        return result;
    }

    let mut seen = HashSet::new();
    for (index, candidate) in candidates.iter().enumerate() {
        result.summary.total += 1;
        let label = candidate_label(index, candidate);

        let validation = validate(candidate);
        if !validation.is_valid {
            result.summary.invalid += 1;
            result.errors.extend(
                validation
                    .issues
                    .iter()
                    .map(|issue| format!("{}: {}", label, issue)),
            );
            continue;
        }

        let Some(entry) = normalize(candidate) else {
            continue;
        };

        if !seen.insert(entry.id.clone()) {
            result.summary.skipped += 1;
            result.warnings.push(format!(
                "{}: duplicate id '{}' skipped, keeping the first occurrence",
                label, entry.id
            ));
            continue;
        }

        result.warnings.extend(
            lint(candidate)
                .into_iter()
                .map(|warning| format!("{}: {}", label, warning)),
        );
        result.summary.valid += 1;
        result.entries.push(entry);
    }

    result.is_valid = !result.entries.is_empty();
    result
}

fn candidate_label(index: usize, candidate: &Value) -> String {
    match scalar_text(candidate.get("id")) {
        Some(id) => format!("Entry {} (id '{}')", index + 1, id),
        None => format!("Entry {}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good(id: &str) -> Value {
        json!({
            "id": id,
            "name": format!("Component {}", id),
            "level": "atom",
            "status": "ready",
            "version": "1.0.0",
            "tags": [],
            "dependencies": []
        })
    }

    #[test]
    fn test_empty_and_malformed_text() {
        let empty = parse_import("  \n");
        assert!(!empty.is_valid);
        assert_eq!(empty.errors.len(), 1);

        let broken = parse_import("{\"components\": [");
        assert!(!broken.is_valid);
        assert_eq!(broken.errors.len(), 1);
        assert!(broken.errors[0].contains("not valid JSON"));
        assert_eq!(broken.summary, ImportSummary::default());
    }

    #[test]
    fn test_unrecognized_layout() {
        let result = parse_import("{\"widgets\": []}");
        assert!(!result.is_valid);
        assert!(result.errors[0].starts_with("No component array"));

        let result = parse_import("42");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_empty_array_is_invalid() {
        let result = parse_import("{\"items\": []}");
        assert!(!result.is_valid);
        assert_eq!(result.summary.total, 0);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_partial_success() {
        let text = json!([good("a"), {"id": "b"}, "garbage"]).to_string();
        let result = parse_import(&text);

        assert!(result.is_valid);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(
            result.summary,
            ImportSummary {
                total: 3,
                valid: 1,
                invalid: 2,
                skipped: 0
            }
        );
        assert!(result.errors.iter().any(|e| e.starts_with("Entry 2 (id 'b'): ")));
        assert!(result.errors.iter().any(|e| e.starts_with("Entry 3: ")));
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let mut second = good("a");
        second["name"] = json!("Second");
        let text = json!({"components": [good("a"), second]}).to_string();

        let result = parse_import(&text);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].name, "Component a");
        assert_eq!(result.summary.skipped, 1);
        assert_eq!(result.summary.valid, 1);
        assert!(result.warnings.iter().any(|w| w.contains("duplicate id 'a'")));
    }

    #[test]
    fn test_single_entry_warns() {
        let result = parse_import(&good("solo").to_string());
        assert!(result.is_valid);
        assert_eq!(result.entries[0].id, "solo");
        assert!(result.warnings[0].contains("single component"));
    }

    #[test]
    fn test_lint_warnings_attached() {
        let mut candidate = good("a");
        candidate["version"] = json!("latest");
        let result = parse_import(&json!([candidate]).to_string());

        assert!(result.is_valid);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.starts_with("Entry 1 (id 'a'): version 'latest'")));
    }

    #[test]
    fn test_error_preview() {
        let result = ImportResult {
            errors: (1..=5).map(|n| format!("error {}", n)).collect(),
            ..ImportResult::default()
        };

        assert_eq!(
            result.error_preview(2),
            vec!["error 1", "error 2", "... and 3 more"]
        );
        assert_eq!(result.error_preview(10).len(), 5);
    }
}
