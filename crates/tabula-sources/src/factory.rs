//! Source factory
//!
//! Builds the ordered source list of one table from its declarative
//! configuration. The configuration enum is closed, so unknown strategy
//! types never reach this point (they fail at config parse); what can fail
//! here is resolving the active document for related/self sources.

use crate::context::WorkspaceContext;
use crate::error::SourceResult;
use crate::source::{Source, SourceSpec};
use std::path::PathBuf;
use std::sync::Arc;
use tabula_config::{IgnoreFilters, SourceConfig};
use tabula_core::Vault;

/// Build sources for a table, in configuration order
pub async fn build_sources(
    configs: &[SourceConfig],
    vault: Arc<dyn Vault>,
    filters: &IgnoreFilters,
    context: &WorkspaceContext,
) -> SourceResult<Vec<Source>> {
    let mut sources = Vec::with_capacity(configs.len());

    for (index, config) in configs.iter().enumerate() {
        let spec = match config {
            SourceConfig::Directory { path } => SourceSpec::Directory {
                path: PathBuf::from(path),
            },
            SourceConfig::Tags { tags } => SourceSpec::Tags { tags: tags.clone() },
            SourceConfig::Related { tags } => SourceSpec::Related {
                anchor: context.active_document().await?,
                tags: tags.clone(),
            },
            SourceConfig::ActiveFile => SourceSpec::ActiveFile {
                file: context.active_document().await?,
            },
        };
        sources.push(Source::new(index, spec, vault.clone(), filters.clone()));
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tabula_core::{DocumentRef, MemoryVault};

    fn vault() -> Arc<dyn Vault> {
        Arc::new(MemoryVault::new().with_document("current.md", ""))
    }

    #[tokio::test]
    async fn builds_in_configuration_order() {
        let configs = vec![
            SourceConfig::Tags {
                tags: vec!["wine".to_string()],
            },
            SourceConfig::Directory {
                path: "wines".to_string(),
            },
        ];
        let ctx = WorkspaceContext::fixed(DocumentRef::new("current.md"));

        let sources = build_sources(&configs, vault(), &IgnoreFilters::none(), &ctx)
            .await
            .unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].id().0, "0:tags:wine");
        assert_eq!(sources[1].id().0, "1:directory:wines");
    }

    #[tokio::test]
    async fn related_anchored_at_active_document() {
        let configs = vec![SourceConfig::Related { tags: vec![] }];
        let ctx = WorkspaceContext::fixed(DocumentRef::new("current.md"));

        let sources = build_sources(&configs, vault(), &IgnoreFilters::none(), &ctx)
            .await
            .unwrap();
        assert_eq!(
            sources[0].spec(),
            &SourceSpec::Related {
                anchor: DocumentRef::new("current.md"),
                tags: vec![],
            }
        );
    }

    #[tokio::test]
    async fn related_without_active_document_fails() {
        let configs = vec![SourceConfig::Related { tags: vec![] }];
        let (_handle, ctx) = WorkspaceContext::channel_with_timeout(Duration::from_millis(10));

        let err = build_sources(&configs, vault(), &IgnoreFilters::none(), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::SourceError::NoActiveDocument(_)));
    }

    #[tokio::test]
    async fn directory_needs_no_context() {
        let configs = vec![SourceConfig::Directory {
            path: "wines".to_string(),
        }];
        let (_handle, ctx) = WorkspaceContext::channel_with_timeout(Duration::from_millis(10));

        let sources = build_sources(&configs, vault(), &IgnoreFilters::none(), &ctx)
            .await
            .unwrap();
        assert_eq!(sources.len(), 1);
    }
}
