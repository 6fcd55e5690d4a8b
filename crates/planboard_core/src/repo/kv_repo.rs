//! Key-value slot contracts and implementations.
//!
//! # Responsibility
//! - Provide durable string slots addressed by fixed keys.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `put` overwrites the whole value of a slot; there are no partial writes.
//! - `get` on a never-written key returns `Ok(None)`, not an error.

use crate::db::DbError;
use crate::model::board::BoardValidationError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot access and decoding of stored documents.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Encoding a document for storage failed.
    Serialization(serde_json::Error),
    /// A stored document is malformed or violates board invariants.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode document: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Slot(value))
    }
}

impl From<BoardValidationError> for RepoError {
    fn from(value: BoardValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Durable string slots keyed by name.
pub trait KvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> RepoResult<()>;
    fn remove(&self, key: &str) -> RepoResult<()>;
}

impl<R: KvRepository + ?Sized> KvRepository for &R {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        (**self).remove(key)
    }
}

/// SQLite-backed slots stored in the `kv_slots` table.
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvRepository for SqliteKvRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM kv_slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Process-local slots for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKvRepository {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryKvRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvRepository for MemoryKvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
