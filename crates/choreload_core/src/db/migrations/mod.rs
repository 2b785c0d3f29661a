//! Counter and run-history schema versions.
//!
//! Each step is applied once, in order, and recorded in `PRAGMA user_version`.
//! A database written by a newer binary is refused rather than downgraded.

use crate::repo::{LogError, LogResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    purpose: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        purpose: "overdue counters",
        sql: include_str!("0001_overdue_counters.sql"),
    },
    SchemaStep {
        version: 2,
        purpose: "schedule run history",
        sql: include_str!("0002_schedule_runs.sql"),
    },
];

/// Schema version this binary reads and writes.
pub fn current_schema_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version stored in `conn`.
pub fn stored_schema_version(conn: &Connection) -> LogResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Applies every missing step in one transaction.
///
/// # Errors
/// - `SchemaTooNew` when the file was written by a newer binary.
pub fn upgrade_schema(conn: &mut Connection) -> LogResult<()> {
    let stored = stored_schema_version(conn)?;
    let supported = current_schema_version();
    if stored > supported {
        return Err(LogError::SchemaTooNew { stored, supported });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > stored)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=counter_db_upgrade module=db status=ok version={} purpose={}",
            step.version, step.purpose
        );
    }
    tx.commit()?;
    Ok(())
}
