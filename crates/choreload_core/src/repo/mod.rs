//! Persistence backends for overdue counters.
//!
//! # Responsibility
//! - Define the contract the run service uses to read and write counters.
//! - Keep file and SQL details out of scheduling code.
//!
//! # Invariants
//! - A missing store is reported as `Ok(None)`, not as an error.
//! - `persist` either writes the whole run or leaves the previous state.

use crate::model::run::ScheduleRun;
use crate::overdue::store::OverdueEntry;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod sqlite_log;
pub mod text_log;

pub type LogResult<T> = Result<T, LogError>;

#[derive(Debug)]
pub enum LogError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A counter line that is not `name,days`.
    Parse {
        line: usize,
        content: String,
    },
    Db(rusqlite::Error),
    /// The database was written by a newer binary.
    SchemaTooNew { stored: u32, supported: u32 },
    /// The connection was not prepared through `db::open_counter_db*`.
    SchemaMismatch { stored: u32, expected: u32 },
    /// A counter cannot be written in a form that reads back unchanged.
    Unencodable { chore: String, reason: &'static str },
    InvalidData(String),
}

impl Display for LogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { line, content } => write!(
                f,
                "overdue log line {line} is not `chore,days`: {content}"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::SchemaTooNew { stored, supported } => write!(
                f,
                "counter database uses schema version {stored}, this build supports up to {supported}"
            ),
            Self::SchemaMismatch { stored, expected } => write!(
                f,
                "counter database is at schema version {stored}, expected {expected}"
            ),
            Self::Unencodable { chore, reason } => {
                write!(f, "cannot write counter for chore {chore:?}: {reason}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted counter data: {message}"),
        }
    }
}

impl Error for LogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            Self::Parse { .. }
            | Self::SchemaTooNew { .. }
            | Self::SchemaMismatch { .. }
            | Self::Unencodable { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for LogError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(value)
    }
}

/// Durable counter storage for one household.
pub trait CounterLog {
    /// Reads persisted counters; `None` when no store exists yet.
    fn load_entries(&self) -> LogResult<Option<Vec<OverdueEntry>>>;
    /// Writes the updated counters of `run`.
    fn persist(&mut self, run: &ScheduleRun) -> LogResult<()>;
}
