//! Wikilink target extraction
//!
//! Minimal `[[target]]` scanning used for forward-link resolution. Aliases
//! (`[[target|alias]]`), heading anchors (`[[target#heading]]`), and embed
//! prefixes (`![[target]]`) are stripped down to the bare target name.

use regex::Regex;
use std::sync::LazyLock;

static WIKILINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[\[([^\]]+)\]\]").expect("wikilink regex"));

/// Distinct wikilink targets of a text, in order of first appearance
pub fn extract_targets(text: &str) -> Vec<String> {
    let mut targets = Vec::new();
    for cap in WIKILINK_REGEX.captures_iter(text) {
        let inner = &cap[1];
        let target = inner
            .split('|')
            .next()
            .unwrap_or(inner)
            .split('#')
            .next()
            .unwrap_or(inner)
            .trim();
        if !target.is_empty() && !targets.iter().any(|t| t == target) {
            targets.push(target.to_string());
        }
    }
    targets
}
