//! Coercion of arbitrary JSON into canonical entries.
//!
//! The policy is coercion-with-fallback: a missing or malformed field is
//! replaced by a safe value instead of rejecting the whole entry. Only a
//! non-object input is rejected. Nested records that cannot reach a
//! minimal shape (a property without a name) are dropped from their parent
//! sequence.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

use super::entry::{Demo, Entry, Level, PropKind, PropertySpec, Status};

/// Version assigned when none is supplied.
pub const DEFAULT_VERSION: &str = "0.1.0";

/// Normalize an arbitrary JSON value into an [`Entry`].
///
/// Returns `None` only when `raw` is not a JSON object. Never panics.
pub fn normalize(raw: &Value) -> Option<Entry> {
    let object = raw.as_object()?;

    let id = scalar_text(object.get("id")).unwrap_or_else(generate_entry_id);
    let name = scalar_text(object.get("name")).unwrap_or_else(placeholder_name);

    let level = object
        .get("level")
        .and_then(Value::as_str)
        .and_then(Level::parse)
        .unwrap_or_default();
    let status = object
        .get("status")
        .and_then(Value::as_str)
        .and_then(Status::parse)
        .unwrap_or_default();
    let version =
        scalar_text(object.get("version")).unwrap_or_else(|| DEFAULT_VERSION.to_string());

    Some(Entry {
        id,
        name,
        level,
        version,
        status,
        tags: text_sequence(object.get("tags")),
        dependencies: text_sequence(object.get("dependencies")),
        notes: optional_text(object.get("notes")),
        description: optional_text(object.get("description")),
        preview_kind: optional_text(object.get("previewKind")),
        code: optional_text(object.get("code")),
        props_spec: normalize_props(object.get("propsSpec")),
        demo: object.get("demo").and_then(normalize_demo),
    })
}

/// Normalize every candidate, dropping the ones that are rejected.
pub fn normalize_all<'a>(raw: impl IntoIterator<Item = &'a Value>) -> Vec<Entry> {
    raw.into_iter().filter_map(normalize).collect()
}

/// Normalize one property spec. `None` when it has no usable name.
pub fn normalize_prop(raw: &Value) -> Option<PropertySpec> {
    let object = raw.as_object()?;
    let name = scalar_text(object.get("name"))?;

    let kind = object
        .get("kind")
        .and_then(Value::as_str)
        .and_then(PropKind::parse)
        .unwrap_or_default();

    let options = match kind {
        PropKind::Select => Some(text_sequence(object.get("options"))),
        _ => None,
    };

    Some(PropertySpec {
        name,
        kind,
        options,
        default: object.get("default").filter(|v| !v.is_null()).cloned(),
        required: object.get("required").and_then(Value::as_bool),
        description: optional_text(object.get("description")),
    })
}

fn normalize_props(raw: Option<&Value>) -> Vec<PropertySpec> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(normalize_prop)
        .filter(|prop| seen.insert(prop.name.clone()))
        .collect()
}

fn normalize_demo(raw: &Value) -> Option<Demo> {
    let object = raw.as_object()?;
    let props: Map<String, Value> = match object.get("props") {
        Some(Value::Object(props)) => props.clone(),
        _ => object.clone(),
    };
    Some(Demo { props })
}

/// Trimmed non-empty string, or a number rendered as a string.
pub(crate) fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce to a list of strings; anything but an array becomes empty.
pub(crate) fn text_sequence(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Bool(b) => Some(b.to_string()),
            other => scalar_text(Some(other)),
        })
        .collect()
}

fn optional_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Generate a unique entry id.
fn generate_entry_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
    format!(
        "cmp-{}-{}",
        base36(millis),
        base36(fastrand::u64(36u64.pow(5)..36u64.pow(6)))
    )
}

/// Numbered placeholder for entries without a name.
fn placeholder_name() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    format!("Untitled component {}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_objects() {
        assert!(normalize(&Value::Null).is_none());
        assert!(normalize(&json!([1, 2, 3])).is_none());
        assert!(normalize(&json!("button")).is_none());
        assert!(normalize(&json!(7)).is_none());
    }

    #[test]
    fn test_empty_object_gets_fallbacks() {
        let entry = normalize(&json!({})).unwrap();

        assert!(entry.id.starts_with("cmp-"));
        assert!(entry.name.starts_with("Untitled component "));
        assert_eq!(entry.level, Level::Atom);
        assert_eq!(entry.status, Status::Draft);
        assert_eq!(entry.version, DEFAULT_VERSION);
        assert!(entry.tags.is_empty());
        assert!(entry.dependencies.is_empty());
        assert!(entry.props_spec.is_empty());
        assert!(entry.demo.is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = normalize(&json!({})).unwrap();
        let b = normalize(&json!({})).unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a.name, b.name);
    }

    #[test]
    fn test_coerces_enums_and_scalars() {
        let entry = normalize(&json!({
            "id": "  btn ",
            "name": 42,
            "level": "ORGANISM",
            "status": "shipped",
            "version": 2
        }))
        .unwrap();

        assert_eq!(entry.id, "btn");
        assert_eq!(entry.name, "42");
        assert_eq!(entry.level, Level::Organism);
        assert_eq!(entry.status, Status::Draft);
        assert_eq!(entry.version, "2");
    }

    #[test]
    fn test_sequences_filter_garbage() {
        let entry = normalize(&json!({
            "id": "a",
            "name": "A",
            "tags": ["form", "", null, 3, true, {"x": 1}, ["nested"], "  "],
            "dependencies": "icon"
        }))
        .unwrap();

        assert_eq!(entry.tags, vec!["form", "3", "true"]);
        assert!(entry.dependencies.is_empty());
    }

    #[test]
    fn test_optional_strings() {
        let entry = normalize(&json!({
            "id": "a",
            "name": "A",
            "notes": "   ",
            "description": "Primary action",
            "code": 12,
            "previewKind": "button"
        }))
        .unwrap();

        assert_eq!(entry.notes, None);
        assert_eq!(entry.description.as_deref(), Some("Primary action"));
        assert_eq!(entry.code, None);
        assert_eq!(entry.preview_kind.as_deref(), Some("button"));
    }

    #[test]
    fn test_props_spec_drops_unnamed_and_duplicates() {
        let entry = normalize(&json!({
            "id": "select",
            "name": "Select",
            "propsSpec": [
                {"name": "size", "kind": "select", "options": ["sm", "md", null]},
                {"kind": "text"},
                "label",
                {"name": "size", "kind": "number"},
                {
                    "name": "disabled",
                    "kind": "toggle",
                    "options": ["a"],
                    "default": false,
                    "required": "yes"
                }
            ]
        }))
        .unwrap();

        assert_eq!(entry.props_spec.len(), 2);
        let size = &entry.props_spec[0];
        assert_eq!(size.kind, PropKind::Select);
        assert_eq!(size.options, Some(vec!["sm".to_string(), "md".to_string()]));

        let disabled = &entry.props_spec[1];
        assert_eq!(disabled.kind, PropKind::Text);
        assert_eq!(disabled.options, None);
        assert_eq!(disabled.default, Some(json!(false)));
        assert_eq!(disabled.required, None);
    }

    #[test]
    fn test_demo_bag() {
        let wrapped = normalize(&json!({"demo": {"props": {"label": "Go"}}})).unwrap();
        assert_eq!(wrapped.demo.unwrap().props.get("label"), Some(&json!("Go")));

        let bare = normalize(&json!({"demo": {"label": "Go"}})).unwrap();
        assert_eq!(bare.demo.unwrap().props.get("label"), Some(&json!("Go")));

        let scalar = normalize(&json!({"demo": "Go"})).unwrap();
        assert!(scalar.demo.is_none());
    }

    #[test]
    fn test_idempotent() {
        let raw = json!({
            "id": "x",
            "level": "Molecule",
            "tags": [1, "a"],
            "propsSpec": [{"name": "p", "kind": "select"}],
            "demo": {"props": 5, "other": true}
        });
        let first = normalize(&raw).unwrap();
        let second = normalize(&first.to_value()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.renormalized(), first);
    }

    #[test]
    fn test_base36() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
    }
}
