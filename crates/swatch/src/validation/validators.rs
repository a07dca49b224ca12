//! Checks that report why a candidate entry is malformed.
//!
//! Unlike the normalizer, nothing here repairs input. Each check appends at
//! most one issue line; the engine runs them in a fixed order so reports
//! are stable.

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::model::{Level, Status};

use super::result::ValidationResult;

/// A single check over a candidate object.
pub trait Validator: Send + Sync {
    /// Append an issue when the check fails.
    fn check(&self, object: &Map<String, Value>, issues: &mut Vec<String>);
}

/// A field that must be a non-empty string (`id`, `name`).
pub struct RequiredTextValidator {
    pub field: &'static str,
}

impl Validator for RequiredTextValidator {
    fn check(&self, object: &Map<String, Value>, issues: &mut Vec<String>) {
        match object.get(self.field) {
            None | Some(Value::Null) => issues.push(format!("Missing '{}'", self.field)),
            Some(Value::String(s)) if s.trim().is_empty() => {
                issues.push(format!("'{}' must not be empty", self.field))
            }
            Some(Value::String(_)) => {}
            Some(other) => issues.push(format!(
                "'{}' must be a string, found {}",
                self.field,
                json_type(other)
            )),
        }
    }
}

/// A field that must be one of a closed set of names.
pub struct EnumValidator {
    pub field: &'static str,
    pub allowed: &'static [&'static str],
    pub accepts: fn(&str) -> bool,
}

impl Validator for EnumValidator {
    fn check(&self, object: &Map<String, Value>, issues: &mut Vec<String>) {
        let ok = object
            .get(self.field)
            .and_then(Value::as_str)
            .is_some_and(|value| (self.accepts)(value));

        if !ok {
            let found = match object.get(self.field) {
                None | Some(Value::Null) => "nothing".to_string(),
                Some(Value::String(s)) => format!("'{}'", s),
                Some(other) => json_type(other).to_string(),
            };
            issues.push(format!(
                "'{}' must be one of {}, found {}",
                self.field,
                self.allowed.join(", "),
                found
            ));
        }
    }
}

/// `version` must be present as a string. Its format is not enforced.
pub struct VersionValidator;

impl Validator for VersionValidator {
    fn check(&self, object: &Map<String, Value>, issues: &mut Vec<String>) {
        match object.get("version") {
            Some(Value::String(_)) => {}
            None | Some(Value::Null) => issues.push("Missing 'version'".to_string()),
            Some(other) => issues.push(format!(
                "'version' must be a string, found {}",
                json_type(other)
            )),
        }
    }
}

/// A field that must be an array. When `required` is false, absence is
/// accepted.
pub struct ArrayValidator {
    pub field: &'static str,
    pub required: bool,
}

impl Validator for ArrayValidator {
    fn check(&self, object: &Map<String, Value>, issues: &mut Vec<String>) {
        match object.get(self.field) {
            Some(Value::Array(_)) => {}
            None | Some(Value::Null) if !self.required => {}
            None | Some(Value::Null) => issues.push(format!("Missing '{}' array", self.field)),
            Some(other) => issues.push(format!(
                "'{}' must be an array, found {}",
                self.field,
                json_type(other)
            )),
        }
    }
}

/// Optional text fields must be strings when present.
pub struct OptionalTextValidator {
    pub fields: &'static [&'static str],
}

impl Validator for OptionalTextValidator {
    fn check(&self, object: &Map<String, Value>, issues: &mut Vec<String>) {
        for field in self.fields {
            match object.get(*field) {
                None | Some(Value::Null) | Some(Value::String(_)) => {}
                Some(other) => issues.push(format!(
                    "'{}' must be a string when present, found {}",
                    field,
                    json_type(other)
                )),
            }
        }
    }
}

/// Runs every check over a candidate.
pub struct ValidationEngine {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidationEngine {
    /// Create a new validation engine with all default validators.
    pub fn new() -> Self {
        Self {
            validators: vec![
                Box::new(RequiredTextValidator { field: "id" }),
                Box::new(RequiredTextValidator { field: "name" }),
                Box::new(EnumValidator {
                    field: "level",
                    allowed: &["atom", "molecule", "organism"],
                    accepts: |v| Level::parse(v).is_some(),
                }),
                Box::new(EnumValidator {
                    field: "status",
                    allowed: &["draft", "ready"],
                    accepts: |v| Status::parse(v).is_some(),
                }),
                Box::new(VersionValidator),
                Box::new(ArrayValidator {
                    field: "tags",
                    required: true,
                }),
                Box::new(ArrayValidator {
                    field: "dependencies",
                    required: true,
                }),
                Box::new(OptionalTextValidator {
                    fields: &["notes", "description", "previewKind", "code"],
                }),
                Box::new(ArrayValidator {
                    field: "propsSpec",
                    required: false,
                }),
            ],
        }
    }

    /// Run all validators over a candidate.
    pub fn validate(&self, candidate: &Value) -> ValidationResult {
        let Some(object) = candidate.as_object() else {
            return ValidationResult::from_issues(vec![format!(
                "Entry must be a JSON object, found {}",
                json_type(candidate)
            )]);
        };

        let mut issues = Vec::new();
        for validator in &self.validators {
            validator.check(object, &mut issues);
        }

        ValidationResult::from_issues(issues)
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_ENGINE: Lazy<ValidationEngine> = Lazy::new(ValidationEngine::new);

/// Validate a candidate with the default checks.
pub fn validate(candidate: &Value) -> ValidationResult {
    DEFAULT_ENGINE.validate(candidate)
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
