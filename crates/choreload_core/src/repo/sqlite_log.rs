//! SQLite counter backend with run history.
//!
//! # Responsibility
//! - Store the same counter contract as `overdue.log` in SQLite.
//! - Keep a history of runs and their assignments for later review.
//!
//! # Invariants
//! - Counters and the run record are written in one transaction.
//! - Connections must be prepared through `db::open_counter_db*` first.

use crate::db::migrations::{current_schema_version, stored_schema_version};
use crate::model::run::{RunId, ScheduleRun};
use crate::overdue::store::OverdueEntry;
use crate::repo::{CounterLog, LogError, LogResult};
use log::info;
use rusqlite::{params, Connection, TransactionBehavior};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conventional database file name inside a household directory.
pub const SQLITE_LOG_FILE_NAME: &str = "overdue.sqlite3";

/// One past run as stored in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub period_days: u32,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub assignments: Vec<HistoricAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricAssignment {
    pub chore: String,
    pub participant: String,
    pub weight: f64,
    pub dedicated: bool,
}

pub struct SqliteCounterLog<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCounterLog<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `SchemaMismatch` when the schema version does not match this binary.
    pub fn try_new(conn: &'conn mut Connection) -> LogResult<Self> {
        let expected = current_schema_version();
        let stored = stored_schema_version(conn)?;
        if stored != expected {
            return Err(LogError::SchemaMismatch { stored, expected });
        }
        Ok(Self { conn })
    }

    /// Returns the latest runs, newest first.
    pub fn recent_runs(&self, limit: u32) -> LogResult<Vec<RunSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT run_id, period_days, created_at
             FROM schedule_runs
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?1;",
        )?;
        let mut rows = stmt.query([i64::from(limit)])?;
        let mut runs = Vec::new();
        while let Some(row) = rows.next()? {
            let run_text: String = row.get("run_id")?;
            let run_id = Uuid::parse_str(&run_text).map_err(|_| {
                LogError::InvalidData(format!(
                    "invalid uuid value `{run_text}` in schedule_runs.run_id"
                ))
            })?;
            runs.push(RunSummary {
                run_id,
                period_days: row.get("period_days")?,
                created_at: row.get("created_at")?,
                assignments: self.load_assignments(&run_text)?,
            });
        }
        Ok(runs)
    }

    fn load_assignments(&self, run_id: &str) -> LogResult<Vec<HistoricAssignment>> {
        let mut stmt = self.conn.prepare(
            "SELECT chore, participant, weight, dedicated
             FROM run_assignments
             WHERE run_id = ?1
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([run_id])?;
        let mut assignments = Vec::new();
        while let Some(row) = rows.next()? {
            let dedicated = match row.get::<_, i64>("dedicated")? {
                0 => false,
                1 => true,
                other => {
                    return Err(LogError::InvalidData(format!(
                        "invalid dedicated value `{other}` in run_assignments.dedicated"
                    )));
                }
            };
            assignments.push(HistoricAssignment {
                chore: row.get("chore")?,
                participant: row.get("participant")?,
                weight: row.get("weight")?,
                dedicated,
            });
        }
        Ok(assignments)
    }

    fn has_history(&self) -> LogResult<bool> {
        let runs: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM schedule_runs;", [], |row| row.get(0))?;
        Ok(runs > 0)
    }
}

impl CounterLog for SqliteCounterLog<'_> {
    fn load_entries(&self) -> LogResult<Option<Vec<OverdueEntry>>> {
        let mut stmt = self.conn.prepare(
            "SELECT chore, days_overdue
             FROM overdue_counters
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let chore: String = row.get("chore")?;
            let days = row.get::<_, i64>("days_overdue")?;
            let days_overdue = u32::try_from(days).map_err(|_| {
                LogError::InvalidData(format!(
                    "invalid days_overdue `{days}` for chore `{chore}`"
                ))
            })?;
            entries.push(OverdueEntry::new(chore, days_overdue));
        }

        if entries.is_empty() && !self.has_history()? {
            return Ok(None);
        }
        Ok(Some(entries))
    }

    fn persist(&mut self, run: &ScheduleRun) -> LogResult<()> {
        let run_text = run.run_id.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute("DELETE FROM overdue_counters;", [])?;
        for entry in run.updated.entries() {
            tx.execute(
                "INSERT INTO overdue_counters (chore, days_overdue) VALUES (?1, ?2);",
                params![entry.chore.as_str(), i64::from(entry.days_overdue)],
            )?;
        }

        tx.execute(
            "INSERT INTO schedule_runs (run_id, period_days) VALUES (?1, ?2);",
            params![run_text.as_str(), i64::from(run.period_days)],
        )?;
        for (position, assigned) in run.assignment.chores().iter().enumerate() {
            tx.execute(
                "INSERT INTO run_assignments (
                    run_id,
                    position,
                    chore,
                    participant,
                    weight,
                    dedicated
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    run_text.as_str(),
                    position as i64,
                    assigned.chore.as_str(),
                    assigned.participant.as_str(),
                    assigned.weight,
                    i64::from(assigned.dedicated),
                ],
            )?;
        }
        tx.commit()?;

        info!(
            "event=overdue_db_write module=repo status=ok run_id={} entries={} assignments={}",
            run.run_id,
            run.updated.len(),
            run.assignment.len()
        );
        Ok(())
    }
}
