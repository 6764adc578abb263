//! Source operation errors

use std::time::Duration;
use tabula_config::ConfigError;
use tabula_core::{SourceId, VaultError};
use thiserror::Error;

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors from source resolution, record loading, and mutation
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to serialize block content: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("source '{0}' does not support adding rows")]
    AddUnsupported(SourceId),

    #[error("no source with id '{0}' in this table")]
    UnknownSource(SourceId),

    #[error("field '{0}' is not a link field with candidate sources")]
    NotALinkField(String),

    #[error("no active document became available within {0:?}")]
    NoActiveDocument(Duration),
}
