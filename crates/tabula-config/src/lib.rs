//! # Tabula Config
//!
//! Declarative configuration for Tabula tables: the per-table block schema
//! (sources, fields, includes) parsed from YAML, regex-based ignore filters,
//! and process-wide persisted settings.

mod block;
mod error;
mod filters;
mod includes;
mod settings;

pub use block::{FieldConfig, FieldType, SourceConfig, TableBlockConfig};
pub use error::{ConfigError, ConfigResult};
pub use filters::IgnoreFilters;
pub use includes::resolve_includes;
pub use settings::Settings;
