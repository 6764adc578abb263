//! Frontmatter codec
//!
//! Parses and rewrites the leading `---` YAML block of a document while
//! leaving every byte outside the block untouched. Malformed YAML inside the
//! markers is treated as an empty mapping: reads see no fields, and the next
//! [`set_field`] discards the unparseable content (availability over
//! preservation).

use crate::document::FieldValue;
use serde_yaml::Mapping;
use std::ops::Range;
use tracing::debug;

/// Delimiter line of the frontmatter block
pub const FRONTMATTER_MARKER: &str = "---";

/// Parsed view of a document's frontmatter
#[derive(Debug, Clone, PartialEq)]
pub struct FrontmatterBlock {
    /// Key-value mapping of the block, in document order
    pub fields: Mapping,

    /// Byte range of the block within the raw text, from the opening `---`
    /// up to and including the closing `---` (excluding its trailing
    /// newline)
    pub span: Range<usize>,
}

impl FrontmatterBlock {
    /// Look up a field and coerce it to a [`FieldValue`]
    pub fn get(&self, field: &str) -> Option<FieldValue> {
        self.fields.get(field).and_then(FieldValue::from_yaml)
    }
}

/// Parse the frontmatter block of a document, if present
///
/// The block must start on the very first line. Returns `None` when the text
/// has no block; returns a block with empty fields when the delimiters are
/// present but the content between them is not a YAML mapping.
pub fn parse(text: &str) -> Option<FrontmatterBlock> {
    if !text.starts_with("---\n") {
        return None;
    }

    // Search from the end of the opening marker rather than past its
    // newline, so an empty block ("---\n---") still closes.
    let rest = &text[3..];
    let end = rest.find("\n---")?;
    let inner = &rest[..end];

    // 3 bytes of opening marker, inner content with its leading newline,
    // "\n---"
    let span = 0..3 + end + 4;

    Some(FrontmatterBlock {
        fields: parse_mapping(inner),
        span,
    })
}

/// Parse loose YAML into a mapping, falling back to empty on anything else
pub(crate) fn parse_mapping(content: &str) -> Mapping {
    match serde_yaml::from_str::<serde_yaml::Value>(content) {
        Ok(serde_yaml::Value::Mapping(mapping)) => mapping,
        Ok(serde_yaml::Value::Null) => Mapping::new(),
        Ok(other) => {
            debug!(?other, "block content is not a mapping, treating as empty");
            Mapping::new()
        }
        Err(error) => {
            debug!(%error, "malformed block content, treating as empty");
            Mapping::new()
        }
    }
}

/// Set one frontmatter field, preserving everything after the block
///
/// The field is assigned unconditionally, discarding any prior value or
/// shape. When the document has no block, one is created at the start of the
/// text and the full original content follows it.
pub fn set_field(
    text: &str,
    field: &str,
    value: &FieldValue,
) -> Result<String, serde_yaml::Error> {
    let block = parse(text);
    let (mut fields, remainder, had_block) = match &block {
        Some(b) => (b.fields.clone(), &text[b.span.end..], true),
        None => (Mapping::new(), text, false),
    };

    fields.insert(
        serde_yaml::Value::String(field.to_string()),
        value.to_yaml(),
    );

    let yaml = serde_yaml::to_string(&fields)?;

    let mut out = String::with_capacity(yaml.len() + remainder.len() + 9);
    out.push_str(FRONTMATTER_MARKER);
    out.push('\n');
    out.push_str(&yaml);
    out.push_str(FRONTMATTER_MARKER);
    if !had_block {
        out.push('\n');
    }
    out.push_str(remainder);
    Ok(out)
}
