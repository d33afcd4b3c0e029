//! SQLite bootstrap behind `SqliteKeyValueStore`.
//!
//! # Invariants
//! - A connection is handed out only after its schema reached
//!   `migrations::target_version()`.
//! - The schema version lives in `PRAGMA user_version`; each migration step
//!   commits on its own, so a failed step leaves the previous version intact.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while preparing the key-value database.
#[derive(Debug)]
pub enum DbError {
    /// The connection could not be opened or configured.
    Open {
        mode: &'static str,
        source: rusqlite::Error,
    },
    /// A schema step failed and was rolled back.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { mode, source } => {
                write!(f, "cannot open {mode} key-value database: {source}")
            }
            Self::Migration {
                version,
                name,
                source,
            } => write!(
                f,
                "key-value schema step {version} ({name}) failed: {source}"
            ),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "key-value database uses schema v{found}, this build understands up to v{supported}"
            ),
            Self::Sqlite(err) => write!(f, "key-value database error: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
