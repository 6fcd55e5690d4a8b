use planboard_core::db::migrations::latest_version;
use planboard_core::db::{open_db, open_db_in_memory, DbError, DbTarget};
use planboard_core::{KvRepository, SqliteKvRepository};
use rusqlite::Connection;

fn slot_row(conn: &Connection, key: &str) -> (String, i64) {
    conn.query_row(
        "SELECT value, updated_at FROM kv_slots WHERE key = ?1;",
        [key],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .unwrap()
}

#[test]
fn fresh_store_is_migrated_to_latest_slot_schema() {
    let conn = open_db_in_memory().unwrap();

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());

    let columns: Vec<String> = conn
        .prepare("SELECT name FROM pragma_table_info('kv_slots') ORDER BY cid;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, vec!["key", "value", "updated_at"]);
}

#[test]
fn upsert_stamps_updated_at_and_keeps_one_row_per_key() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    repo.put("theme", "light").unwrap();
    let (_, first_stamp) = slot_row(&conn, "theme");
    assert!(first_stamp > 0);

    conn.execute("UPDATE kv_slots SET updated_at = 0 WHERE key = 'theme';", [])
        .unwrap();
    repo.put("theme", "dark").unwrap();

    let (value, second_stamp) = slot_row(&conn, "theme");
    assert_eq!(value, "dark");
    assert!(second_stamp > 0);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn slots_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planboard.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        SqliteKvRepository::new(&conn)
            .put("experimentBoardData", "{}")
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let value = SqliteKvRepository::new(&conn)
        .get("experimentBoardData")
        .unwrap();
    assert_eq!(value.as_deref(), Some("{}"));
}

#[test]
fn open_failure_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("planboard.sqlite3");

    match open_db(&path).unwrap_err() {
        DbError::Open { target, .. } => assert_eq!(target, DbTarget::File(path)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_from_a_newer_build_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion {
            db_version: 999,
            ..
        }
    ));
    assert!(err.to_string().contains("999"));
}

#[test]
fn conflicting_slot_table_rolls_back_and_names_the_migration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clash.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE kv_slots (key TEXT);")
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::Migration { version, .. } => assert_eq!(version, 1),
        other => panic!("unexpected error: {other}"),
    }

    let version: u32 = Connection::open(&path)
        .unwrap()
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, 0);
}
