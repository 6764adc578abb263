//! Include resolution
//!
//! A table block may list other documents under `include:`. Their
//! frontmatter mappings are merged into the block configuration before it is
//! deserialized, in list order, with later values winning on key collision
//! (included values also win over keys spelled in the block itself).

use crate::block::TableBlockConfig;
use crate::error::{ConfigError, ConfigResult};
use tabula_core::{DocumentRef, Vault};
use tracing::debug;

/// Parse a table block, merging any included documents' frontmatter first
pub async fn resolve_includes(src: &str, vault: &dyn Vault) -> ConfigResult<TableBlockConfig> {
    let mut value: serde_yaml::Value = serde_yaml::from_str(src)?;

    let include_paths: Vec<String> = value
        .get("include")
        .cloned()
        .map(serde_yaml::from_value)
        .transpose()?
        .unwrap_or_default();

    if let (Some(base), false) = (value.as_mapping_mut(), include_paths.is_empty()) {
        for path in &include_paths {
            let doc = DocumentRef::new(path.as_str());
            let block = vault
                .frontmatter(&doc)
                .await
                .map_err(|source| ConfigError::Include {
                    path: path.clone(),
                    source,
                })?;

            let Some(block) = block else {
                debug!(%doc, "included document has no frontmatter");
                continue;
            };
            for (key, field) in block.fields {
                base.insert(key, field);
            }
        }
    }

    Ok(serde_yaml::from_value(value)?)
}
