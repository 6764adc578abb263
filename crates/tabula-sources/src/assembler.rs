//! Record assembly
//!
//! Turns the ordered member set of a source into flat records: frontmatter
//! fields first, link fields merged over them (links win on collision), plus
//! provenance. Documents are read concurrently but the output preserves
//! member order, and any single read failure fails the whole batch.

use crate::error::SourceResult;
use futures::future::try_join_all;
use tabula_config::IgnoreFilters;
use tabula_core::{links, DocumentRef, FieldValue, Record, SourceId, Vault};
use tracing::debug;

pub(crate) async fn assemble(
    vault: &dyn Vault,
    source: &SourceId,
    files: Vec<DocumentRef>,
    filters: &IgnoreFilters,
) -> SourceResult<Vec<Record>> {
    let kept: Vec<DocumentRef> = files
        .into_iter()
        .filter(|doc| {
            let ignored = filters.is_ignored(&doc.path.to_string_lossy());
            if ignored {
                debug!(%doc, "excluded by ignore filter");
            }
            !ignored
        })
        .collect();

    try_join_all(kept.into_iter().map(|doc| load_record(vault, source, doc))).await
}

async fn load_record(
    vault: &dyn Vault,
    source: &SourceId,
    doc: DocumentRef,
) -> SourceResult<Record> {
    let mut record = Record::new(doc, source.clone());

    if let Some(block) = vault.frontmatter(&record.file).await? {
        for (key, value) in &block.fields {
            let Some(key) = key.as_str() else { continue };
            if let Some(field) = FieldValue::from_yaml(value) {
                record.fields.insert(key.to_string(), field);
            }
        }
    }

    let text = vault.read(&record.file).await?;
    for (field, names) in links::parse(&text) {
        record.fields.insert(field, FieldValue::List(names));
    }

    Ok(record)
}
