//! Source strategies
//!
//! A [`Source`] binds one membership strategy to a vault and the active
//! ignore filters. Strategies are a closed enum resolved once at factory
//! time; sources are built per table evaluation and discarded after records
//! are produced.

use crate::assembler;
use crate::error::{SourceError, SourceResult};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tabula_config::IgnoreFilters;
use tabula_core::{frontmatter, links, ContentStamp, DocumentRef, FieldValue, Record, SourceId, Vault};
use tracing::debug;

/// Membership rule of a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// All documents under a path prefix
    Directory { path: PathBuf },

    /// All documents whose frontmatter `tags` intersect the given set
    /// (case-sensitive, any-of)
    Tags { tags: Vec<String> },

    /// Forward-link targets of the anchor document, optionally tag-filtered
    Related {
        anchor: DocumentRef,
        tags: Vec<String>,
    },

    /// Exactly one designated document
    ActiveFile { file: DocumentRef },
}

impl SourceSpec {
    fn label(&self) -> String {
        match self {
            SourceSpec::Directory { path } => format!("directory:{}", path.display()),
            SourceSpec::Tags { tags } => format!("tags:{}", tags.join(",")),
            SourceSpec::Related { anchor, .. } => format!("related:{anchor}"),
            SourceSpec::ActiveFile { file } => format!("self:{file}"),
        }
    }
}

/// One membership strategy bound to a vault and filter set
#[derive(Clone)]
pub struct Source {
    id: SourceId,
    spec: SourceSpec,
    vault: Arc<dyn Vault>,
    filters: IgnoreFilters,
}

impl Source {
    /// Build a source; `index` is its position in the table configuration
    /// and keeps ids unique across identically-configured sources
    pub fn new(
        index: usize,
        spec: SourceSpec,
        vault: Arc<dyn Vault>,
        filters: IgnoreFilters,
    ) -> Self {
        let id = SourceId(format!("{index}:{}", spec.label()));
        Self {
            id,
            spec,
            vault,
            filters,
        }
    }

    pub fn id(&self) -> &SourceId {
        &self.id
    }

    pub fn spec(&self) -> &SourceSpec {
        &self.spec
    }

    /// Whether this strategy can create new rows
    pub fn supports_add(&self) -> bool {
        matches!(
            self.spec,
            SourceSpec::Directory { .. } | SourceSpec::Tags { .. }
        )
    }

    /// The strategy's member documents, before ignore filtering
    pub async fn member_files(&self) -> SourceResult<Vec<DocumentRef>> {
        match &self.spec {
            SourceSpec::Directory { path } => Ok(self.vault.list_under(path).await?),

            SourceSpec::Tags { tags } => {
                let all = self.vault.list().await?;
                self.filter_by_tags(all, tags).await
            }

            SourceSpec::Related { anchor, tags } => {
                let related = self.vault.forward_links(anchor).await?;
                self.filter_by_tags(related, tags).await
            }

            SourceSpec::ActiveFile { file } => Ok(vec![file.clone()]),
        }
    }

    /// Load the member documents into records (ignore filter applied)
    pub async fn load_records(&self) -> SourceResult<Vec<Record>> {
        let files = self.member_files().await?;
        debug!(source = %self.id, members = files.len(), "loading records");
        assembler::assemble(self.vault.as_ref(), &self.id, files, &self.filters).await
    }

    /// Parsed link fields of one document
    pub async fn read_links(&self, doc: &DocumentRef) -> SourceResult<BTreeMap<String, Vec<String>>> {
        Ok(links::parse(&self.vault.read(doc).await?))
    }

    /// Set a link field on one document
    ///
    /// Values are normalized (trimmed, wrapped in `[[ ]]`, singleton lists
    /// collapsed to a scalar); an empty slice clears the field but keeps the
    /// key. The edit is committed with a stamped write and fails as stale if
    /// the document changed since it was read.
    pub async fn set_link(
        &self,
        doc: &DocumentRef,
        field: &str,
        values: &[String],
    ) -> SourceResult<()> {
        // The cached read is only used to locate byte positions; the stamp
        // makes the final write fail rather than splice against stale offsets
        let text = self.vault.cached_read(doc).await?;
        let base = ContentStamp::of(&text);

        let span = frontmatter::parse(&text).map(|b| b.span);
        let updated = links::set_field(&text, span, field, values)?;

        self.vault.write_checked(doc, &base, &updated).await?;
        Ok(())
    }

    /// Set a frontmatter field on one document
    pub async fn set_data(
        &self,
        doc: &DocumentRef,
        field: &str,
        value: &FieldValue,
    ) -> SourceResult<()> {
        let text = self.vault.cached_read(doc).await?;
        let base = ContentStamp::of(&text);

        let updated = frontmatter::set_field(&text, field, value)?;

        self.vault.write_checked(doc, &base, &updated).await?;
        Ok(())
    }

    /// Delete a member document
    pub async fn delete_row(&self, doc: &DocumentRef) -> SourceResult<()> {
        self.vault.delete(doc).await?;
        Ok(())
    }

    /// Create a new row document and return its identity
    ///
    /// Directory sources create an empty document under their prefix; tag
    /// sources create one at the vault root pre-seeded with their tag set.
    /// Other strategies do not support creation.
    pub async fn add_row(&self, name: &str) -> SourceResult<DocumentRef> {
        match &self.spec {
            SourceSpec::Directory { path } => {
                let target = path.join(format!("{name}.md"));
                Ok(self.vault.create(&target, "").await?)
            }
            SourceSpec::Tags { tags } => {
                let target = PathBuf::from(format!("{name}.md"));
                let seed = format!("---\ntags: {}\n---\n", tags.join(", "));
                Ok(self.vault.create(&target, &seed).await?)
            }
            _ => Err(SourceError::AddUnsupported(self.id.clone())),
        }
    }

    /// Keep documents whose `tags` frontmatter field intersects `tags`
    ///
    /// An empty filter set keeps everything. Scalar tag fields are
    /// comma-split; matching is case-sensitive.
    async fn filter_by_tags(
        &self,
        files: Vec<DocumentRef>,
        tags: &[String],
    ) -> SourceResult<Vec<DocumentRef>> {
        if tags.is_empty() {
            return Ok(files);
        }

        let mut kept = Vec::new();
        for doc in files {
            let doc_tags = self.document_tags(&doc).await?;
            if doc_tags.iter().any(|t| tags.contains(t)) {
                kept.push(doc);
            }
        }
        Ok(kept)
    }

    async fn document_tags(&self, doc: &DocumentRef) -> SourceResult<Vec<String>> {
        let tags = match self.vault.frontmatter(doc).await? {
            Some(block) => match block.get("tags") {
                Some(FieldValue::Scalar(s)) => {
                    s.split(',').map(|t| t.trim().to_string()).collect()
                }
                Some(FieldValue::List(items)) => items,
                None => Vec::new(),
            },
            None => Vec::new(),
        };
        Ok(tags)
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("id", &self.id)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}
