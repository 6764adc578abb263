//! Document identity and record types
//!
//! A [`Record`] is the flat, transient view of one document as seen by a
//! table: frontmatter fields merged with link-block fields, tagged with the
//! originating document and source strategy. Records are rebuilt on every
//! load and never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Identity of a document: a vault-relative path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub path: PathBuf,
}

impl DocumentRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Display name of the document: the file stem
    ///
    /// This is the name used as a wikilink target, so `wines/riesling.md`
    /// has the display name `riesling`.
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// Whether this document lives under the given path prefix
    ///
    /// Matching is per path component, so `win` does not match
    /// `wines/riesling.md`.
    pub fn is_under(&self, prefix: &Path) -> bool {
        self.path.starts_with(prefix)
    }
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl From<&str> for DocumentRef {
    fn from(path: &str) -> Self {
        DocumentRef::new(path)
    }
}

impl From<String> for DocumentRef {
    fn from(path: String) -> Self {
        DocumentRef::new(path)
    }
}

/// Identifier of the source strategy a record came from
///
/// Wraps a string identifier for type safety. Callers hand it back to route
/// mutations to the owning source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(pub String);

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SourceId {
    fn from(s: String) -> Self {
        SourceId(s)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        SourceId(s.to_string())
    }
}

/// Value of one record field
///
/// Field values are either a single string or a list of strings; an absent
/// field is simply missing from the record. Link fields are always
/// normalized to [`FieldValue::List`] on read, even when their serialized
/// form collapsed to a bare scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Coerce a YAML value into a field value
    ///
    /// Scalars are stringified, sequences become string lists (nested
    /// non-scalar elements are dropped), and null or mapping values yield
    /// `None` (absent field).
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<FieldValue> {
        use serde_yaml::Value;
        match value {
            Value::Null => None,
            Value::Sequence(items) => Some(FieldValue::List(
                items.iter().filter_map(yaml_scalar_to_string).collect(),
            )),
            Value::Mapping(_) | Value::Tagged(_) => None,
            scalar => yaml_scalar_to_string(scalar).map(FieldValue::Scalar),
        }
    }

    /// Convert back to a YAML value for serialization
    pub fn to_yaml(&self) -> serde_yaml::Value {
        use serde_yaml::Value;
        match self {
            FieldValue::Scalar(s) => Value::String(s.clone()),
            FieldValue::List(items) => Value::Sequence(
                items.iter().map(|s| Value::String(s.clone())).collect(),
            ),
        }
    }

    /// View the value as a list, cloning a scalar into a singleton
    pub fn to_list(&self) -> Vec<String> {
        match self {
            FieldValue::Scalar(s) => vec![s.clone()],
            FieldValue::List(items) => items.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One row of a logical table
///
/// Flat merge of a document's frontmatter and link fields plus provenance.
/// Link fields win over frontmatter fields on key collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Originating document
    pub file: DocumentRef,

    /// Source strategy that produced this record
    pub source: SourceId,

    /// Merged field values
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(file: DocumentRef, source: SourceId) -> Self {
        Self {
            file,
            source,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }
}
