//! Table engine
//!
//! The caller-facing surface of one table instance: records across all of
//! its sources, link-field autocomplete, and mutation entry points routed to
//! the owning source by [`SourceId`].

use crate::context::WorkspaceContext;
use crate::error::{SourceError, SourceResult};
use crate::factory::build_sources;
use crate::source::Source;
use std::collections::BTreeSet;
use std::sync::Arc;
use tabula_config::{FieldConfig, FieldType, IgnoreFilters, TableBlockConfig};
use tabula_core::{DocumentRef, FieldValue, Record, SourceId, Vault};

/// One evaluated table instance
pub struct Table {
    fields: Vec<FieldConfig>,
    sources: Vec<Source>,
    vault: Arc<dyn Vault>,
    filters: IgnoreFilters,
    context: WorkspaceContext,
}

impl Table {
    /// Resolve a table from its configuration
    pub async fn open(
        config: TableBlockConfig,
        vault: Arc<dyn Vault>,
        filters: IgnoreFilters,
        context: WorkspaceContext,
    ) -> SourceResult<Self> {
        let sources = build_sources(&config.sources, vault.clone(), &filters, &context).await?;
        Ok(Self {
            fields: config.fields,
            sources,
            vault,
            filters,
            context,
        })
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn fields(&self) -> &[FieldConfig] {
        &self.fields
    }

    /// Records of every source, concatenated in source order
    pub async fn load_data(&self) -> SourceResult<Vec<Record>> {
        let mut records = Vec::new();
        for source in &self.sources {
            records.extend(source.load_records().await?);
        }
        Ok(records)
    }

    /// Candidate display names for a link field
    ///
    /// The field must be declared with `type: link` and its own candidate
    /// source list; the result is the distinct, sorted display names of all
    /// records of those sources.
    pub async fn autocomplete(&self, field: &str) -> SourceResult<Vec<String>> {
        let declared = self
            .fields
            .iter()
            .find(|f| f.name == field)
            .filter(|f| f.kind == FieldType::Link);
        let configs = declared
            .and_then(|f| f.sources.as_deref())
            .ok_or_else(|| SourceError::NotALinkField(field.to_string()))?;

        let sources =
            build_sources(configs, self.vault.clone(), &self.filters, &self.context).await?;

        let mut names = BTreeSet::new();
        for source in &sources {
            for record in source.load_records().await? {
                names.insert(record.file.name().to_string());
            }
        }
        Ok(names.into_iter().collect())
    }

    fn source(&self, id: &SourceId) -> SourceResult<&Source> {
        self.sources
            .iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| SourceError::UnknownSource(id.clone()))
    }

    /// Set a link field on a document through its owning source
    pub async fn set_link(
        &self,
        source: &SourceId,
        doc: &DocumentRef,
        field: &str,
        values: &[String],
    ) -> SourceResult<()> {
        self.source(source)?.set_link(doc, field, values).await
    }

    /// Set a frontmatter field on a document through its owning source
    pub async fn set_data(
        &self,
        source: &SourceId,
        doc: &DocumentRef,
        field: &str,
        value: &FieldValue,
    ) -> SourceResult<()> {
        self.source(source)?.set_data(doc, field, value).await
    }

    /// Delete a row document
    pub async fn delete_row(&self, source: &SourceId, doc: &DocumentRef) -> SourceResult<()> {
        self.source(source)?.delete_row(doc).await
    }

    /// Create a new row document in the given source
    pub async fn add_row(&self, source: &SourceId, name: &str) -> SourceResult<DocumentRef> {
        self.source(source)?.add_row(name).await
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("fields", &self.fields)
            .field("sources", &self.sources)
            .finish_non_exhaustive()
    }
}
