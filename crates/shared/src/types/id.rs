//! Record identifiers.
//!
//! Rows created by this system get UUID v7 keys stored as text, but callers may
//! reference rows by any opaque key the persistence layer hands out, including
//! numeric surrogate keys. [`RecordId`] models that union.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// A reference to a persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    /// A UUID key.
    Uuid(Uuid),
    /// Any other non-empty string key.
    Text(String),
    /// A positive integer key.
    Numeric(u64),
}

impl RecordId {
    /// Generates a fresh time-ordered key for a new row.
    #[must_use]
    pub fn generate() -> Self {
        Self::Uuid(Uuid::now_v7())
    }

    /// Returns the key in the text form used by the persistence layer.
    #[must_use]
    pub fn to_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(id) => write!(f, "{id}"),
            Self::Text(key) => f.write_str(key),
            Self::Numeric(key) => write!(f, "{key}"),
        }
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self::Uuid(id)
    }
}

/// Generates a new primary key in text form.
#[must_use]
pub fn new_key() -> String {
    RecordId::generate().to_key()
}
