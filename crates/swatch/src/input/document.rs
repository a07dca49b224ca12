//! JSON parsing and entry-array extraction.

use serde_json::Value;
use tracing::debug;

/// Parse text as JSON, returning `None` for empty or malformed input.
///
/// This is the only place in the crate where a JSON parse error is
/// discarded. Callers that need to report the failure do so in their own
/// terms ("file is not valid JSON") without the parser's message.
pub fn safe_parse(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, bytes = trimmed.len(), "discarding unparseable JSON");
            None
        }
    }
}

/// One strategy for locating the entry array inside a parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// The document itself is an array.
    BareArray,
    /// The document is an object carrying the array under this key.
    Keyed(&'static str),
    /// The document is a single entry-like object (has `id` or `name`).
    SingleEntry,
}

impl Extraction {
    /// Apply the strategy. `None` means "this strategy does not match".
    pub fn apply(&self, document: &Value) -> Option<Vec<Value>> {
        match self {
            Extraction::BareArray => document.as_array().cloned(),
            Extraction::Keyed(key) => document.as_object()?.get(*key)?.as_array().cloned(),
            Extraction::SingleEntry => {
                let object = document.as_object()?;
                if object.contains_key("id") || object.contains_key("name") {
                    Some(vec![document.clone()])
                } else {
                    None
                }
            }
        }
    }

    /// Human-readable label for diagnostics.
    pub fn label(&self) -> String {
        match self {
            Extraction::BareArray => "array".to_string(),
            Extraction::Keyed(key) => format!("object.{}", key),
            Extraction::SingleEntry => "single entry".to_string(),
        }
    }
}

/// Shapes accepted from the cache and the remote endpoint.
pub const REMOTE_EXTRACTIONS: &[Extraction] = &[
    Extraction::BareArray,
    Extraction::Keyed("components"),
    Extraction::Keyed("items"),
    Extraction::Keyed("catalog"),
    Extraction::Keyed("data"),
];

/// Shapes accepted from user import files. A lone entry object is
/// tolerated here (the import pipeline warns about it).
pub const IMPORT_EXTRACTIONS: &[Extraction] = &[
    Extraction::BareArray,
    Extraction::Keyed("components"),
    Extraction::Keyed("items"),
    Extraction::Keyed("catalog"),
    Extraction::Keyed("data"),
    Extraction::SingleEntry,
];

/// Try each strategy in order and return the first match.
pub fn extract_entries(
    document: &Value,
    strategies: &[Extraction],
) -> Option<(Extraction, Vec<Value>)> {
    strategies
        .iter()
        .find_map(|strategy| strategy.apply(document).map(|items| (*strategy, items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_parse() {
        assert_eq!(safe_parse("[1, 2]"), Some(json!([1, 2])));
        assert_eq!(safe_parse("  {\"a\": 1}\n"), Some(json!({"a": 1})));
        assert_eq!(safe_parse(""), None);
        assert_eq!(safe_parse("   "), None);
        assert_eq!(safe_parse("{not json"), None);
    }

    #[test]
    fn test_extract_bare_array() {
        let doc = json!([{"id": "a"}]);
        let (strategy, items) = extract_entries(&doc, REMOTE_EXTRACTIONS).unwrap();
        assert_eq!(strategy, Extraction::BareArray);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_extract_keyed_in_order() {
        let doc = json!({"items": [{"id": "x"}], "data": [{"id": "y"}, {"id": "z"}]});
        let (strategy, items) = extract_entries(&doc, REMOTE_EXTRACTIONS).unwrap();
        assert_eq!(strategy, Extraction::Keyed("items"));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_keyed_requires_array() {
        let doc = json!({"components": "nope", "catalog": []});
        let (strategy, items) = extract_entries(&doc, REMOTE_EXTRACTIONS).unwrap();
        assert_eq!(strategy, Extraction::Keyed("catalog"));
        assert!(items.is_empty());
    }

    #[test]
    fn test_single_entry_only_for_imports() {
        let doc = json!({"id": "button", "name": "Button"});
        assert!(extract_entries(&doc, REMOTE_EXTRACTIONS).is_none());

        let (strategy, items) = extract_entries(&doc, IMPORT_EXTRACTIONS).unwrap();
        assert_eq!(strategy, Extraction::SingleEntry);
        assert_eq!(items, vec![doc.clone()]);
    }

    #[test]
    fn test_unrecognized_document() {
        assert!(extract_entries(&json!({"other": []}), IMPORT_EXTRACTIONS).is_none());
        assert!(extract_entries(&json!(42), IMPORT_EXTRACTIONS).is_none());
        assert_eq!(Extraction::Keyed("data").label(), "object.data");
    }
}
