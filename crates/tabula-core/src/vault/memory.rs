//! In-memory vault
//!
//! Reference implementation of [`Vault`] backed by a map. Serves as the
//! test substrate and as a working store for hosts that keep documents in
//! memory.

use super::{Vault, VaultError, VaultResult};
use crate::document::DocumentRef;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Map-backed vault
#[derive(Debug, Default)]
pub struct MemoryVault {
    docs: RwLock<BTreeMap<PathBuf, String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document, builder-style
    pub fn with_document(self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.docs.write().insert(path.into(), text.into());
        self
    }

    /// Number of documents currently stored
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }
}

#[async_trait]
impl Vault for MemoryVault {
    async fn list(&self) -> VaultResult<Vec<DocumentRef>> {
        // BTreeMap iteration is already lexicographic
        Ok(self
            .docs
            .read()
            .keys()
            .map(|p| DocumentRef::new(p.clone()))
            .collect())
    }

    async fn read(&self, doc: &DocumentRef) -> VaultResult<String> {
        self.docs
            .read()
            .get(&doc.path)
            .cloned()
            .ok_or_else(|| VaultError::NotFound(doc.to_string()))
    }

    async fn write(&self, doc: &DocumentRef, text: &str) -> VaultResult<()> {
        let mut docs = self.docs.write();
        match docs.get_mut(&doc.path) {
            Some(existing) => {
                *existing = text.to_string();
                Ok(())
            }
            None => Err(VaultError::NotFound(doc.to_string())),
        }
    }

    async fn create(&self, path: &Path, text: &str) -> VaultResult<DocumentRef> {
        let mut docs = self.docs.write();
        if docs.contains_key(path) {
            return Err(VaultError::AlreadyExists(path.display().to_string()));
        }
        docs.insert(path.to_path_buf(), text.to_string());
        Ok(DocumentRef::new(path))
    }

    async fn delete(&self, doc: &DocumentRef) -> VaultResult<()> {
        self.docs
            .write()
            .remove(&doc.path)
            .map(|_| ())
            .ok_or_else(|| VaultError::NotFound(doc.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::ContentStamp;

    #[tokio::test]
    async fn test_list_is_sorted() {
        let vault = MemoryVault::new()
            .with_document("b.md", "")
            .with_document("a.md", "")
            .with_document("a/c.md", "");

        let docs = vault.list().await.unwrap();
        let paths: Vec<_> = docs.iter().map(|d| d.to_string()).collect();
        assert_eq!(paths, vec!["a.md", "a/c.md", "b.md"]);
    }

    #[tokio::test]
    async fn test_read_missing() {
        let vault = MemoryVault::new();
        let err = vault.read(&DocumentRef::new("nope.md")).await.unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_write_requires_existing() {
        let vault = MemoryVault::new();
        let err = vault
            .write(&DocumentRef::new("nope.md"), "text")
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate() {
        let vault = MemoryVault::new().with_document("a.md", "");
        let err = vault.create(Path::new("a.md"), "").await.unwrap_err();
        assert!(matches!(err, VaultError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_write_checked_detects_stale() {
        let vault = MemoryVault::new().with_document("a.md", "original");
        let doc = DocumentRef::new("a.md");

        let base = ContentStamp::of(&vault.read(&doc).await.unwrap());
        vault.write(&doc, "changed elsewhere").await.unwrap();

        let err = vault
            .write_checked(&doc, &base, "my edit")
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::StaleWrite { .. }));
        assert_eq!(vault.read(&doc).await.unwrap(), "changed elsewhere");
    }

    #[tokio::test]
    async fn test_write_checked_commits_when_fresh() {
        let vault = MemoryVault::new().with_document("a.md", "original");
        let doc = DocumentRef::new("a.md");

        let base = ContentStamp::of(&vault.read(&doc).await.unwrap());
        vault.write_checked(&doc, &base, "my edit").await.unwrap();
        assert_eq!(vault.read(&doc).await.unwrap(), "my edit");
    }

    #[tokio::test]
    async fn test_forward_links_by_display_name() {
        let vault = MemoryVault::new()
            .with_document("notes/doc1.md", "See [[doc2]] and [[doc3|alias]].")
            .with_document("notes/doc2.md", "")
            .with_document("other/doc3.md", "")
            .with_document("other/doc4.md", "");

        let links = vault
            .forward_links(&DocumentRef::new("notes/doc1.md"))
            .await
            .unwrap();
        let paths: Vec<_> = links.iter().map(|d| d.to_string()).collect();
        assert_eq!(paths, vec!["notes/doc2.md", "other/doc3.md"]);
    }
}
