//! SQLite home of the counter log.
//!
//! # Responsibility
//! - Open a household database and bring its counter and run-history tables
//!   to the version this binary writes.
//!
//! # Invariants
//! - A returned connection always has the current schema.
//! - Failures surface as `LogError`, the same type `SqliteCounterLog` returns.

use crate::repo::{LogError, LogResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

pub mod migrations;

/// Opens (creating if needed) the household database at `path`.
pub fn open_counter_db(path: impl AsRef<Path>) -> LogResult<Connection> {
    let path = path.as_ref();
    prepare(&path.display().to_string(), || Connection::open(path))
}

/// Opens a throwaway database with the current schema.
pub fn open_counter_db_in_memory() -> LogResult<Connection> {
    prepare(":memory:", Connection::open_in_memory)
}

fn prepare<F>(target: &str, connect: F) -> LogResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    let result = connect().map_err(LogError::from).and_then(|mut conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        migrations::upgrade_schema(&mut conn)?;
        Ok(conn)
    });

    match &result {
        Ok(_) => info!(
            "event=counter_db_open module=db status=ok target={} duration_ms={}",
            target,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=counter_db_open module=db status=error target={} duration_ms={} error={}",
            target,
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}
