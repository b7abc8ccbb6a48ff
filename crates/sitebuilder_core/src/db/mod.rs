//! SQLite file behind `SqliteKeyValueStore`.
//!
//! The schema is a single `kv_slots` table: one row per slot key, holding
//! the serialized project as text plus a last-write timestamp. Nothing else
//! in the crate touches SQL directly.
//!
//! # Responsibility
//! - Open file or in-memory connections with a busy timeout.
//! - Create or upgrade `kv_slots` before the first slot read or write.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A database from a newer binary fails to open with
//!   `DbError::UnsupportedSchemaVersion`; it is never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or migrating the slot database.
#[derive(Debug)]
pub enum DbError {
    /// Any rusqlite failure while connecting, migrating or querying slots.
    Sqlite(rusqlite::Error),
    /// `user_version` is ahead of every migration this binary knows.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "slot database error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "slot database schema v{db_version} was written by a newer build \
                 (this build reads up to v{latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn newer_schema_message_names_both_versions() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 7,
            latest_supported: 1,
        };
        let message = err.to_string();
        assert!(message.contains("v7"), "unexpected message: {message}");
        assert!(message.contains("up to v1"), "unexpected message: {message}");
        assert!(err.source().is_none());
    }

    #[test]
    fn sqlite_failure_keeps_its_source() {
        let err = DbError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(err.to_string().starts_with("slot database error"));
        assert!(err.source().is_some());
    }
}
