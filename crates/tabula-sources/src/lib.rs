//! # Tabula Sources
//!
//! Membership strategies and the table engine. A [`Source`] resolves an
//! ordered set of member documents (by directory, tag set, relation to the
//! active document, or a singleton), loads them into flat [`Record`]s, and
//! routes field mutations back through the block codecs. A [`Table`] bundles
//! the sources of one table instance behind the caller-facing surface:
//! `load_data`, autocomplete, and mutation entry points.
//!
//! [`Record`]: tabula_core::Record

mod assembler;
mod context;
mod error;
mod factory;
mod source;
mod table;

pub use context::{WorkspaceContext, WorkspaceHandle};
pub use error::{SourceError, SourceResult};
pub use factory::build_sources;
pub use source::{Source, SourceSpec};
pub use table::Table;
