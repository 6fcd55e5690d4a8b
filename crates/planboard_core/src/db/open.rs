//! Connection bootstrap for the board store.
//!
//! # Invariants
//! - Returned connections have the slot schema fully migrated.
//! - Open failures carry the target they were opening.

use super::migrations::apply_migrations;
use super::{DbError, DbResult, DbTarget};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the board store file at `path`, migrating it when needed.
///
/// Parent directories are not created; callers pass a path inside an
/// existing directory.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with(DbTarget::File(path.to_path_buf()), || Connection::open(path))
}

/// Opens a throwaway in-memory board store.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(DbTarget::Memory, Connection::open_in_memory)
}

fn open_with(
    target: DbTarget,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start target={target}");

    let result = connect()
        .and_then(|conn| conn.busy_timeout(BUSY_TIMEOUT).map(|()| conn))
        .map_err(|source| DbError::Open {
            target: target.clone(),
            source,
        })
        .and_then(|mut conn| apply_migrations(&mut conn).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok target={} duration_ms={}",
            target,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error target={} duration_ms={} error_code={} error={}",
            target,
            started_at.elapsed().as_millis(),
            error_code(err),
            err
        ),
    }
    result
}

fn error_code(err: &DbError) -> &'static str {
    match err {
        DbError::Open { .. } => "db_open_failed",
        DbError::Migration { .. } => "db_migration_failed",
        DbError::UnsupportedSchemaVersion { .. } => "db_schema_too_new",
        DbError::Slot(_) => "db_slot_failed",
    }
}
