//! Plain-text `overdue.log` backend.
//!
//! Format: one `chore,days` pair per line. The chore name is everything
//! before the last comma, so names may themselves contain commas. Names with
//! control characters or surrounding whitespace are refused on write, since
//! they would not read back as the same chore.

use crate::model::run::ScheduleRun;
use crate::overdue::store::{OverdueEntry, OverdueSnapshot};
use crate::repo::{CounterLog, LogError, LogResult};
use log::{info, warn};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Conventional file name inside a household directory.
pub const TEXT_LOG_FILE_NAME: &str = "overdue.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCounterLog {
    path: PathBuf,
}

impl TextCounterLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `snapshot`, replacing the file atomically.
    pub fn write_snapshot(&self, snapshot: &OverdueSnapshot) -> LogResult<()> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let io_err = |source| LogError::Io {
            path: self.path.clone(),
            source,
        };

        let content = encode(snapshot)?;
        let mut staged = NamedTempFile::new_in(&directory).map_err(io_err)?;
        staged
            .write_all(content.as_bytes())
            .map_err(io_err)?;
        staged.as_file().sync_all().map_err(io_err)?;
        staged
            .persist(&self.path)
            .map_err(|err| io_err(err.error))?;
        Ok(())
    }
}

impl CounterLog for TextCounterLog {
    fn load_entries(&self) -> LogResult<Option<Vec<OverdueEntry>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "event=overdue_log_missing module=repo status=warn path={}",
                    self.path.display()
                );
                return Ok(None);
            }
            Err(source) => {
                return Err(LogError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        decode(&content).map(Some)
    }

    fn persist(&mut self, run: &ScheduleRun) -> LogResult<()> {
        self.write_snapshot(&run.updated)?;
        info!(
            "event=overdue_log_write module=repo status=ok run_id={} entries={}",
            run.run_id,
            run.updated.len()
        );
        Ok(())
    }
}

/// Parses `overdue.log` content. Blank lines are skipped.
pub fn decode(content: &str) -> LogResult<Vec<OverdueEntry>> {
    let mut entries = Vec::new();
    for (offset, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let parse_err = || LogError::Parse {
            line: offset + 1,
            content: line.to_string(),
        };
        let (chore, days) = line.rsplit_once(',').ok_or_else(parse_err)?;
        let chore = chore.trim();
        if chore.is_empty() {
            return Err(parse_err());
        }
        let days = days.trim().parse::<u32>().map_err(|_| parse_err())?;
        entries.push(OverdueEntry::new(chore, days));
    }
    Ok(entries)
}

/// Renders `snapshot` as `overdue.log` content.
///
/// # Errors
/// - `Unencodable` when a chore name would not decode back to itself.
pub fn encode(snapshot: &OverdueSnapshot) -> LogResult<String> {
    let mut content = String::new();
    for entry in snapshot.entries() {
        let reason = if entry.chore.chars().any(char::is_control) {
            Some("name contains a control character")
        } else if entry.chore.trim() != entry.chore || entry.chore.is_empty() {
            Some("name is blank or has surrounding whitespace")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(LogError::Unencodable {
                chore: entry.chore.clone(),
                reason,
            });
        }
        content.push_str(&format!("{},{}\n", entry.chore, entry.days_overdue));
    }
    Ok(content)
}
