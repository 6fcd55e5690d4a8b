//! SQLite storage bootstrap for the board key-value slots.
//!
//! # Responsibility
//! - Open file or in-memory connections backing `kv_slots`.
//! - Bring the slot schema up to date before any read or write.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Errors name the stage that failed: open, migration or slot access.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Where a connection was opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    File(PathBuf),
    Memory,
}

impl Display for DbTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "`{}`", path.display()),
            Self::Memory => f.write_str("in-memory store"),
        }
    }
}

/// Failures of the board storage layer.
#[derive(Debug)]
pub enum DbError {
    /// The SQLite file could not be opened or configured.
    Open {
        target: DbTarget,
        source: rusqlite::Error,
    },
    /// Applying the slot schema migration `version` failed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build with an unknown slot schema.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Reading or writing a slot failed after bootstrap.
    Slot(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open board store {target}: {source}")
            }
            Self::Migration { version, source } => {
                write!(f, "slot schema migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "board store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Slot(err) => write!(f, "slot access failed: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Slot(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Slot(value)
    }
}
