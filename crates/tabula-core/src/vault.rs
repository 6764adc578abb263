//! Vault abstraction
//!
//! The [`Vault`] trait is the seam between Tabula and the host application's
//! document store. It covers exactly what the source engine needs: document
//! listing, raw-text read/write, create/delete, a parsed frontmatter view,
//! and forward-link resolution.
//!
//! Writes that rewrite an existing document go through
//! [`Vault::write_checked`], which compares a [`ContentStamp`] taken at read
//! time against the current content and fails with
//! [`VaultError::StaleWrite`] when the document changed underneath. The
//! check is best-effort (no lock is held between check and write).

use crate::document::DocumentRef;
use crate::frontmatter::{self, FrontmatterBlock};
use crate::stamp::ContentStamp;
use crate::wikilink;
use async_trait::async_trait;
use std::path::Path;
use tracing::warn;

mod fs;
mod memory;

pub use fs::FsVault;
pub use memory::MemoryVault;

/// Common result type for vault operations
pub type VaultResult<T> = Result<T, VaultError>;

/// Vault operation errors
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("document already exists: {0}")]
    AlreadyExists(String),

    #[error("stale write to {path}: document changed since it was read")]
    StaleWrite { path: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Host document store
///
/// Implementations must be `Send + Sync` for use across async boundaries.
/// `read` is authoritative (always current); `cached_read` may serve a stale
/// copy and is only used to locate byte offsets prior to a checked write.
#[async_trait]
pub trait Vault: Send + Sync {
    /// All documents of the vault, in lexicographic path order
    async fn list(&self) -> VaultResult<Vec<DocumentRef>>;

    /// Documents whose path starts with the given prefix, in list order
    async fn list_under(&self, prefix: &Path) -> VaultResult<Vec<DocumentRef>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|doc| doc.is_under(prefix))
            .collect())
    }

    /// Authoritative raw text of a document
    async fn read(&self, doc: &DocumentRef) -> VaultResult<String>;

    /// Possibly-stale raw text of a document
    ///
    /// Defaults to the authoritative read; hosts with a content cache can
    /// override this to avoid hitting storage.
    async fn cached_read(&self, doc: &DocumentRef) -> VaultResult<String> {
        self.read(doc).await
    }

    /// Parsed frontmatter view of a document, reflecting latest content
    async fn frontmatter(&self, doc: &DocumentRef) -> VaultResult<Option<FrontmatterBlock>> {
        Ok(frontmatter::parse(&self.read(doc).await?))
    }

    /// Replace the full raw text of an existing document
    async fn write(&self, doc: &DocumentRef, text: &str) -> VaultResult<()>;

    /// Replace a document's text only if it still matches `base`
    ///
    /// `base` is the stamp of the text the caller's edit was computed from.
    async fn write_checked(
        &self,
        doc: &DocumentRef,
        base: &ContentStamp,
        text: &str,
    ) -> VaultResult<()> {
        let current = ContentStamp::of(&self.read(doc).await?);
        if current != *base {
            warn!(doc = %doc, base = %base, current = %current, "rejecting stale write");
            return Err(VaultError::StaleWrite {
                path: doc.to_string(),
            });
        }
        self.write(doc, text).await
    }

    /// Create a document at a path with the given initial text
    ///
    /// Fails with [`VaultError::AlreadyExists`] when the path is taken.
    async fn create(&self, path: &Path, text: &str) -> VaultResult<DocumentRef>;

    /// Delete a document
    async fn delete(&self, doc: &DocumentRef) -> VaultResult<()>;

    /// Documents that `doc` links to (forward links only, not backlinks)
    ///
    /// The default resolves wikilink targets in the document's text against
    /// the display names of all vault documents, in vault list order.
    async fn forward_links(&self, doc: &DocumentRef) -> VaultResult<Vec<DocumentRef>> {
        let text = self.read(doc).await?;
        let targets = wikilink::extract_targets(&text);

        let mut out = Vec::new();
        for candidate in self.list().await? {
            if targets.iter().any(|t| t == candidate.name()) {
                out.push(candidate);
            }
        }
        Ok(out)
    }
}

impl VaultError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            VaultError::NotFound(path.display().to_string())
        } else {
            VaultError::Io {
                path: path.display().to_string(),
                source,
            }
        }
    }
}
