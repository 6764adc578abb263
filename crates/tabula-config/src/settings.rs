//! Persisted application settings
//!
//! Process-wide configuration applied to every table: currently the global
//! ignore filter list. Stored as TOML; loading a missing file yields the
//! defaults so first runs need no setup.

use crate::error::ConfigResult;
use crate::filters::IgnoreFilters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Application-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Regex patterns excluding documents from every source lookup
    pub ignore_filters: Vec<String>,
}

impl Settings {
    /// Load settings from a TOML file, falling back to defaults when the
    /// file does not exist
    pub async fn load(path: &Path) -> ConfigResult<Self> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save settings, creating parent directories as needed
    pub async fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Compile the configured ignore filters
    pub fn ignore_filters(&self) -> ConfigResult<IgnoreFilters> {
        IgnoreFilters::new(&self.ignore_filters)
    }
}
