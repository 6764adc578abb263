//! # Tabula Core
//!
//! Document model, vault abstraction, and block codecs for Tabula.
//!
//! A Tabula document is a plain markdown file with up to two structured
//! zones: a leading `---` frontmatter block and an optional `%%%` link block
//! holding wikilink references to other documents. This crate owns the
//! text-surgery codecs for both zones and the [`Vault`] trait through which
//! the host application's document store is consumed.

pub mod document;
pub mod frontmatter;
pub mod links;
pub mod stamp;
pub mod vault;
pub mod wikilink;

pub use document::{DocumentRef, FieldValue, Record, SourceId};
pub use frontmatter::FrontmatterBlock;
pub use stamp::ContentStamp;
pub use vault::{FsVault, MemoryVault, Vault, VaultError, VaultResult};
