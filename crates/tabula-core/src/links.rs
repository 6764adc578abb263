//! Link block codec
//!
//! The link block is a `%%%`-delimited YAML mapping holding wikilink
//! references to other documents:
//!
//! ```text
//! %%%
//! strain: '[[Riesling]]'
//! pairs:
//! - '[[Trout]]'
//! - '[[Asparagus]]'
//! %%%
//! ```
//!
//! On read every value is normalized to a list of plain display names. On
//! write a single-element list collapses to a bare scalar; re-reading the
//! collapsed form still yields a one-element list. An empty value keeps the
//! field key with an empty list rather than deleting it, so a cleared field
//! stays distinguishable from one that was never set.

use serde_yaml::Value;
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::debug;

/// Delimiter of the link block, appearing twice (start and end)
pub const LINK_BLOCK_MARKER: &str = "%%%";

/// Byte positions of the two marker occurrences, if both are present
///
/// A lone opening marker with no closing one is treated as "no block": the
/// read path sees no links and the write path inserts a fresh block rather
/// than guessing at an end position.
fn locate(text: &str) -> Option<(usize, usize)> {
    let start = text.find(LINK_BLOCK_MARKER)?;
    let close = text[start + 3..].find(LINK_BLOCK_MARKER)? + start + 3;
    Some((start, close))
}

/// Parse the link block into field-to-reference-name lists
///
/// Returns an empty map when no block exists. Values that are not already
/// lists are split on commas; every element has its `[[` `]]` wrapping
/// stripped and is trimmed. Empty elements are dropped, so a cleared field
/// reads as an empty list.
pub fn parse(text: &str) -> BTreeMap<String, Vec<String>> {
    let Some((start, close)) = locate(text) else {
        return BTreeMap::new();
    };

    let inner = &text[start + 3..close];
    let mapping = crate::frontmatter::parse_mapping(inner);

    let mut links = BTreeMap::new();
    for (key, value) in &mapping {
        let Some(key) = key.as_str() else {
            debug!(?key, "skipping non-string link field key");
            continue;
        };
        links.insert(key.to_string(), normalize_value(value));
    }
    links
}

fn normalize_value(value: &Value) -> Vec<String> {
    let raw: Vec<String> = match value {
        Value::Sequence(items) => items
            .iter()
            .flat_map(|item| match item {
                // `[[X]]` without quotes parses as a nested sequence
                Value::Sequence(inner) => inner
                    .iter()
                    .filter_map(scalar_string)
                    .collect::<Vec<_>>(),
                other => scalar_string(other).into_iter().collect(),
            })
            .collect(),
        Value::Null => Vec::new(),
        scalar => scalar_string(scalar)
            .map(|s| s.split(',').map(str::to_string).collect())
            .unwrap_or_default(),
    };

    raw.iter()
        .map(|item| strip_reference(item))
        .filter(|item| !item.is_empty())
        .collect()
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Strip the double-bracket wrapping from a reference token
fn strip_reference(token: &str) -> String {
    token.replace("[[", "").replace("]]", "").trim().to_string()
}

/// Wrap a display name in reference-token notation
fn wrap_reference(name: &str) -> String {
    format!("[[{}]]", name.trim())
}

/// Set one link field and splice the updated block back into the text
///
/// Existing fields are re-emitted as parsed; only the target field changes.
/// When the document has no link block, one is inserted immediately after
/// the frontmatter block (given by `frontmatter_span`, see
/// [`crate::frontmatter::parse`]) or prepended to the whole body when there
/// is no frontmatter either. All content outside the spliced region is
/// preserved byte-for-byte.
pub fn set_field(
    text: &str,
    frontmatter_span: Option<Range<usize>>,
    field: &str,
    values: &[String],
) -> Result<String, serde_yaml::Error> {
    let (before, inner, after) = match locate(text) {
        Some((start, close)) => (&text[..start], &text[start + 3..close], &text[close + 3..]),
        None => match frontmatter_span {
            Some(span) => {
                let cut = (span.end + 1).min(text.len());
                (&text[..cut], "", &text[span.end.min(text.len())..])
            }
            None => ("", "", text),
        },
    };

    let mut mapping = crate::frontmatter::parse_mapping(inner);

    let wrapped: Vec<Value> = values
        .iter()
        .map(|v| Value::String(wrap_reference(v)))
        .collect();
    let new_value = if wrapped.len() == 1 {
        wrapped.into_iter().next().unwrap_or(Value::Null)
    } else {
        Value::Sequence(wrapped)
    };
    mapping.insert(Value::String(field.to_string()), new_value);

    let yaml = serde_yaml::to_string(&mapping)?;

    let mut out = String::with_capacity(before.len() + yaml.len() + after.len() + 8);
    out.push_str(before);
    if !before.is_empty() && !before.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(LINK_BLOCK_MARKER);
    out.push('\n');
    out.push_str(&yaml);
    out.push_str(LINK_BLOCK_MARKER);
    out.push_str(after);
    Ok(out)
}
