//! Filesystem vault
//!
//! [`Vault`] implementation over a directory of markdown files. Discovery
//! walks the root recursively, skipping hidden entries and keeping `.md` /
//! `.markdown` files; document paths are vault-relative.

use super::{Vault, VaultError, VaultResult};
use crate::document::DocumentRef;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Directory-backed vault
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, doc: &Path) -> PathBuf {
        self.root.join(doc)
    }

    fn is_hidden(entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
    }

    fn is_markdown(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| MARKDOWN_EXTENSIONS.contains(&ext))
            .unwrap_or(false)
    }
}

#[async_trait]
impl Vault for FsVault {
    async fn list(&self) -> VaultResult<Vec<DocumentRef>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !Self::is_hidden(e))
        {
            let entry = entry.map_err(|e| VaultError::Io {
                path: self.root.display().to_string(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() || !Self::is_markdown(entry.path()) {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                paths.push(relative.to_path_buf());
            }
        }
        paths.sort();
        Ok(paths.into_iter().map(DocumentRef::new).collect())
    }

    async fn read(&self, doc: &DocumentRef) -> VaultResult<String> {
        let path = self.absolute(&doc.path);
        fs::read_to_string(&path)
            .await
            .map_err(|e| VaultError::io(&doc.path, e))
    }

    async fn write(&self, doc: &DocumentRef, text: &str) -> VaultResult<()> {
        let path = self.absolute(&doc.path);
        // Replace-only: a mutation target that vanished is an integrity
        // error, not an invitation to recreate the file
        if !path.is_file() {
            return Err(VaultError::NotFound(doc.to_string()));
        }
        debug!(doc = %doc, bytes = text.len(), "writing document");
        fs::write(&path, text)
            .await
            .map_err(|e| VaultError::io(&doc.path, e))
    }

    async fn create(&self, path: &Path, text: &str) -> VaultResult<DocumentRef> {
        let absolute = self.absolute(path);
        if absolute.exists() {
            return Err(VaultError::AlreadyExists(path.display().to_string()));
        }
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| VaultError::io(path, e))?;
        }
        debug!(path = %path.display(), "creating document");
        fs::write(&absolute, text)
            .await
            .map_err(|e| VaultError::io(path, e))?;
        Ok(DocumentRef::new(path))
    }

    async fn delete(&self, doc: &DocumentRef) -> VaultResult<()> {
        let path = self.absolute(&doc.path);
        debug!(doc = %doc, "deleting document");
        fs::remove_file(&path)
            .await
            .map_err(|e| VaultError::io(&doc.path, e))
    }
}
