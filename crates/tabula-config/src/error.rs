//! Configuration error types

use tabula_core::VaultError;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Table-block YAML failed to parse (including unknown source types,
    /// which are rejected rather than silently skipped)
    #[error("invalid table configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// An ignore pattern is not a valid regular expression
    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An included document could not be read
    #[error("failed to resolve include '{path}': {source}")]
    Include {
        path: String,
        #[source]
        source: VaultError,
    },

    /// I/O error during settings load/save
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file failed to parse
    #[error("invalid settings file: {0}")]
    SettingsParse(#[from] toml::de::Error),

    /// Settings failed to serialize
    #[error("failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),
}
