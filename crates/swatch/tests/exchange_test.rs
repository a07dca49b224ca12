//! Integration tests for the import/export pipeline.

use serde_json::{json, Value};

use swatch::exchange::{build_export, export_file_name, parse_import, ExportOptions, ImportSummary};
use swatch::loader::builtin_entries;
use swatch::{normalize, Entry};

fn candidate(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Component {}", id),
        "level": "molecule",
        "status": "draft",
        "version": "2.1.0",
        "tags": ["layout"],
        "dependencies": []
    })
}

fn user_entries() -> Vec<Entry> {
    [
        json!({
            "id": "chip",
            "name": "Chip",
            "level": "atom",
            "status": "ready",
            "version": "1.2.0",
            "tags": ["filter", "input"],
            "notes": "Dismissible when onRemove is set",
            "propsSpec": [
                {"name": "label", "kind": "text", "required": true},
                {
                    "name": "tone",
                    "kind": "select",
                    "options": ["neutral", "accent"],
                    "default": "neutral"
                }
            ],
            "demo": {"props": {"label": "Design", "tone": "accent"}}
        }),
        json!({
            "id": "toolbar",
            "name": "Toolbar",
            "level": "organism",
            "dependencies": ["chip", "builtin-button"],
            "previewKind": "live",
            "code": "<Toolbar />"
        }),
    ]
    .iter()
    .filter_map(normalize)
    .collect()
}

// =============================================================================
// Import Tests
// =============================================================================

#[test]
fn test_partial_success() {
    let text = json!([
        candidate("a"),
        {"name": "No id"},
        {"id": "c", "name": "C", "level": "planet"}
    ])
    .to_string();

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
    assert!(result.errors.iter().any(|e| e.starts_with("Entry 2: Missing 'id'")));
    assert!(result.errors.iter().any(|e| e.starts_with("Entry 3 (id 'c'): ")));
}

#[test]
fn test_total_failure() {
    let text = json!({"components": [{"id": "x"}, {"name": "y"}]}).to_string();

    let result = parse_import(&text);

    assert!(!result.is_valid);
    assert!(result.entries.is_empty());
    assert_eq!(result.summary.total, 2);
    assert_eq!(result.summary.invalid, 2);
    assert!(!result.errors.is_empty());
}

#[test]
fn test_malformed_json_never_panics() {
    for text in ["", "{", "[1, 2", "nul", "\u{0}", "{\"components\": [}"] {
        let result = parse_import(text);
        assert!(!result.is_valid, "{:?} should be rejected", text);
        assert_eq!(result.errors.len(), 1);
        assert!(result.entries.is_empty());
    }
}

#[test]
fn test_each_conventional_key_is_accepted() {
    for key in ["components", "items", "catalog", "data"] {
        let text = json!({ key: [candidate("k")] }).to_string();
        let result = parse_import(&text);
        assert!(result.is_valid, "key '{}' not recognized", key);
        assert_eq!(result.entries[0].id, "k");
    }
}

#[test]
fn test_error_preview_truncates() {
    let candidates: Vec<Value> = (0..20).map(|n| json!({"id": format!("bad-{}", n)})).collect();
    let result = parse_import(&Value::Array(candidates).to_string());

    let preview = result.error_preview(10);
    assert_eq!(preview.len(), 11);
    assert!(preview[10].starts_with("... and "));
}

// =============================================================================
// Export Tests
// =============================================================================

#[test]
fn test_export_filters_builtins() {
    let mut entries = builtin_entries();
    entries.extend(user_entries());

    let document = build_export(&entries, &ExportOptions::default());
    let ids: Vec<&str> = document.components.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["chip", "toolbar"]);

    let metadata = document.metadata.expect("metadata requested");
    assert_eq!(metadata.total, 2);
    assert_eq!(metadata.by_level.atom, 1);
    assert_eq!(metadata.by_level.organism, 1);
    assert_eq!(metadata.by_status.ready, 1);
    assert_eq!(metadata.by_status.draft, 1);
}

#[test]
fn test_export_document_shape() {
    let document = build_export(&user_entries(), &ExportOptions::default());
    let json: Value = serde_json::from_str(&document.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["components"][0]["propsSpec"][1]["options"], json!(["neutral", "accent"]));
    assert_eq!(json["components"][1]["previewKind"], "live");
    assert!(json["metadata"]["exportedAt"].is_string());
    assert_eq!(json["metadata"]["byLevel"]["organism"], 1);
}

#[test]
fn test_export_file_name_is_timestamped() {
    let name = export_file_name(chrono::Utc::now());
    assert!(name.starts_with("swatch-export-"));
    assert!(name.ends_with(".json"));
    assert_eq!(name.len(), "swatch-export-YYYYMMDD-HHMMSS.json".len());
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_round_trip_with_metadata() {
    let entries = user_entries();
    let text = build_export(&entries, &ExportOptions::new().with_metadata(true))
        .to_json()
        .unwrap();

    let result = parse_import(&text);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.entries, entries);
}

#[test]
fn test_round_trip_builtins() {
    let entries = builtin_entries();
    let options = ExportOptions::new().with_builtins(true).with_metadata(false);
    let text = build_export(&entries, &options).to_json_pretty().unwrap();

    let result = parse_import(&text);
    assert_eq!(result.entries, entries);
    assert_eq!(result.summary.valid, entries.len());
}
