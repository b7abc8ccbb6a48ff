//! Durable key-value slots and project persistence.
//!
//! # Responsibility
//! - Abstract the host's durable key-value capability behind `KeyValueStore`.
//! - Serialize projects into exactly one named slot (`ProjectStorage`).
//!
//! # Invariants
//! - `ProjectStorage` never surfaces a failure to its caller; failures are
//!   logged and degrade to "nothing saved" / "nothing loaded".

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod project_storage;

pub use kv::{MemoryKeyValueStore, SqliteKeyValueStore};
pub use project_storage::{ProjectStorage, DEFAULT_STORAGE_KEY};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure inside the persistence boundary.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite transport or schema failure.
    Db(DbError),
    /// Project could not be encoded as JSON.
    Encode(serde_json::Error),
    /// Stored value is not a valid project document.
    Decode(serde_json::Error),
    /// Host backend failure, e.g. quota exceeded.
    Backend(String),
}

impl StorageError {
    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "db_failed",
            Self::Encode(_) => "encode_failed",
            Self::Decode(_) => "decode_failed",
            Self::Backend(_) => "backend_failed",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode project: {err}"),
            Self::Decode(err) => write!(f, "stored project is invalid: {err}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Host capability: a durable string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}
