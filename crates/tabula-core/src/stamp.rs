//! Content stamps for stale-write detection
//!
//! A [`ContentStamp`] is a blake3 hash of a document's raw text, taken at
//! the read an edit is based on and re-checked before the edit is committed.
//! See [`crate::vault::Vault::write_checked`].

/// Hash of a document's raw text at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentStamp([u8; 32]);

impl ContentStamp {
    /// Stamp the given text
    pub fn of(text: &str) -> Self {
        Self(*blake3::hash(text.as_bytes()).as_bytes())
    }

    /// Hex rendering, for diagnostics
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for ContentStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 12 hex chars are plenty for log correlation
        write!(f, "{}", &self.to_hex()[..12])
    }
}
