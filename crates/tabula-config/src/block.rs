//! Table-block configuration schema
//!
//! Each table instance is configured by a small YAML block:
//!
//! ```yaml
//! sources:
//! - type: directory
//!   path: wines
//! fields:
//! - name: region
//! - name: strain
//!   type: link
//!   sources:
//!   - type: tags
//!     tags: [strain]
//! include:
//! - templates/wine-table.md
//! ```

use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};

/// Membership strategy declaration
///
/// A closed, internally-tagged enum: an unknown `type` fails config parsing
/// with an explicit error instead of being silently skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// All documents under a path prefix
    Directory { path: String },

    /// All documents whose frontmatter `tags` intersect the given set
    Tags { tags: Vec<String> },

    /// Forward-link targets of the active document, optionally tag-filtered
    Related {
        #[serde(default)]
        tags: Vec<String>,
    },

    /// Exactly the active document
    #[serde(rename = "self")]
    ActiveFile,
}

/// Declared type of a table field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Link,
}

/// One column of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: FieldType,

    /// Candidate sources for link-field autocomplete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceConfig>>,
}

/// Full configuration of one table instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBlockConfig {
    pub sources: Vec<SourceConfig>,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,

    /// Documents whose frontmatter is merged into this configuration
    /// before evaluation (see [`crate::resolve_includes`])
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

impl TableBlockConfig {
    /// Parse a table block from its YAML text
    pub fn parse(src: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(src)?)
    }

    /// Look up a declared field by name
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }
}
