//! Canonical entry types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::normalize::normalize;

/// Hierarchical classification of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Smallest building block (button, icon).
    #[default]
    Atom,
    /// Composition of atoms (search field).
    Molecule,
    /// Composition of molecules (header, card grid).
    Organism,
}

impl Level {
    /// All levels in display order.
    pub const ALL: [Level; 3] = [Level::Atom, Level::Molecule, Level::Organism];

    /// Parse a level, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "atom" => Some(Level::Atom),
            "molecule" => Some(Level::Molecule),
            "organism" => Some(Level::Organism),
            _ => None,
        }
    }

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Atom => "atom",
            Level::Molecule => "molecule",
            Level::Organism => "organism",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Atom => "Atom",
            Level::Molecule => "Molecule",
            Level::Organism => "Organism",
        }
    }
}

/// Readiness of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Work in progress.
    #[default]
    Draft,
    /// Approved for use.
    Ready,
}

impl Status {
    /// All statuses in display order.
    pub const ALL: [Status; 2] = [Status::Draft, Status::Ready];

    /// Parse a status, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(Status::Draft),
            "ready" => Some(Status::Ready),
            _ => None,
        }
    }

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Ready => "ready",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Ready => "Ready",
        }
    }
}

/// Input control kind for a component property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
    #[default]
    Text,
    Number,
    Boolean,
    Select,
}

impl PropKind {
    /// Parse a kind, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(PropKind::Text),
            "number" => Some(PropKind::Number),
            "boolean" => Some(PropKind::Boolean),
            "select" => Some(PropKind::Select),
            _ => None,
        }
    }
}

/// Declared property of a component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    /// Property name, unique within its entry.
    pub name: String,

    /// Input control kind.
    pub kind: PropKind,

    /// Allowed values. Only kept for [`PropKind::Select`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Default value, any JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Property bag used for preview rendering.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Demo {
    pub props: Map<String, Value>,
}

/// A catalog record describing one reusable UI component.
///
/// External data becomes an `Entry` only through [`normalize`]. There is
/// no `Deserialize` impl, so untrusted JSON cannot skip coercion.
///
/// Fields are public, so a value can also be built or edited by hand. Such
/// values are not checked until they pass through the normalizer again:
/// [`merge`](crate::merge::merge) and
/// [`CatalogState::new`](crate::catalog::CatalogState::new) both do that.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Identity key, unique within a collection.
    pub id: String,

    /// Human label.
    pub name: String,

    pub level: Level,

    /// Free-form version, semver by convention.
    pub version: String,

    pub status: Status,

    pub tags: Vec<String>,

    /// Ids of entries this one composes. Not required to resolve.
    pub dependencies: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub props_spec: Vec<PropertySpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<Demo>,
}

impl Entry {
    /// Serialize to a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Run this entry through the normalizer again.
    ///
    /// Normalization is idempotent, so for entries built by the normalizer
    /// this returns an equal value.
    pub fn renormalized(&self) -> Entry {
        normalize(&self.to_value()).unwrap_or_else(|| self.clone())
    }

    /// Check if the entry carries a tag (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Look up a declared property by name.
    pub fn prop(&self, name: &str) -> Option<&PropertySpec> {
        self.props_spec.iter().find(|p| p.name == name)
    }
}
