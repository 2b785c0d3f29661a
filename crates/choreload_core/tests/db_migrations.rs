use choreload_core::db::migrations::{current_schema_version, stored_schema_version};
use choreload_core::db::{open_counter_db, open_counter_db_in_memory};
use choreload_core::{LogError, SqliteCounterLog};
use rusqlite::Connection;

#[test]
fn in_memory_database_gets_current_schema() {
    let conn = open_counter_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), current_schema_version());
    assert_table_exists(&conn, "overdue_counters");
    assert_table_exists(&conn, "schedule_runs");
    assert_table_exists(&conn, "run_assignments");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overdue.sqlite3");

    let conn_first = open_counter_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), current_schema_version());
    drop(conn_first);

    let conn_second = open_counter_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), current_schema_version());
    assert_table_exists(&conn_second, "overdue_counters");
}

#[test]
fn counters_table_rejects_negative_days() {
    let conn = open_counter_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO overdue_counters (chore, days_overdue) VALUES ('Dust', -1);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_counter_db(&path).unwrap_err();
    match err {
        LogError::SchemaTooNew { stored, supported } => {
            assert_eq!(stored, 999);
            assert_eq!(supported, current_schema_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn counter_log_rejects_unmigrated_connection() {
    let mut conn = Connection::open_in_memory().unwrap();
    let err = SqliteCounterLog::try_new(&mut conn).err().unwrap();
    assert!(matches!(
        err,
        LogError::SchemaMismatch { stored: 0, expected } if expected == current_schema_version()
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    stored_schema_version(conn).unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
