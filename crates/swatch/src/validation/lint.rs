//! Non-fatal notes about a candidate that passes validation.
//!
//! These describe what the normalizer is about to silently change, so an
//! import preview can show it before anything is written.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::model::{normalize_prop, scalar_text, PropKind};

use super::validators::json_type;

static SEMVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^v?\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?$")
        .expect("semver pattern is valid")
});

/// Collect warnings for a candidate. Non-objects produce none; the
/// validator already reports them.
pub fn lint(candidate: &Value) -> Vec<String> {
    let Some(object) = candidate.as_object() else {
        return Vec::new();
    };

    let mut warnings = Vec::new();

    if let Some(Value::String(version)) = object.get("version") {
        if !SEMVER.is_match(version.trim()) {
            warnings.push(format!(
                "version '{}' is not semantic-version shaped",
                version
            ));
        }
    }

    for field in ["tags", "dependencies"] {
        if let Some(Value::Array(items)) = object.get(field) {
            let dropped = items
                .iter()
                .filter(|item| !matches!(item, Value::Bool(_)) && scalar_text(Some(item)).is_none())
                .count();
            if dropped > 0 {
                warnings.push(format!(
                    "{} empty or non-text value(s) in '{}' will be dropped",
                    dropped, field
                ));
            }
        }
    }

    if let Some(Value::Array(props)) = object.get("propsSpec") {
        let mut seen = HashSet::new();
        for (index, raw) in props.iter().enumerate() {
            let Some(prop) = normalize_prop(raw) else {
                warnings.push(format!(
                    "propsSpec[{}] ({}) has no name and will be dropped",
                    index,
                    json_type(raw)
                ));
                continue;
            };

            if !seen.insert(prop.name.clone()) {
                warnings.push(format!(
                    "propsSpec[{}] duplicates property '{}' and will be dropped",
                    index, prop.name
                ));
            }

            if let Some(kind) = raw.get("kind").and_then(Value::as_str) {
                if PropKind::parse(kind).is_none() {
                    warnings.push(format!(
                        "property '{}' has unknown kind '{}', using text",
                        prop.name, kind
                    ));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_candidate_has_no_warnings() {
        let warnings = lint(&json!({
            "version": "1.2.3",
            "tags": ["a"],
            "propsSpec": [{"name": "size", "kind": "select"}]
        }));
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_version_shape() {
        assert!(lint(&json!({"version": "v2.0.0-beta.1"})).is_empty());
        assert_eq!(lint(&json!({"version": "latest"})).len(), 1);
    }

    #[test]
    fn test_dropped_sequence_values() {
        let warnings = lint(&json!({"tags": ["ok", "", null, true], "dependencies": [{}]}));
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("2 empty"));
    }

    #[test]
    fn test_props_spec_warnings() {
        let warnings = lint(&json!({
            "propsSpec": [
                {"name": "a", "kind": "color"},
                {"kind": "text"},
                {"name": "a"}
            ]
        }));
        assert_eq!(warnings.len(), 3, "{:?}", warnings);
        assert!(warnings[0].contains("unknown kind 'color'"));
        assert!(warnings[1].contains("propsSpec[1]"));
        assert!(warnings[2].contains("duplicates property 'a'"));
    }
}
