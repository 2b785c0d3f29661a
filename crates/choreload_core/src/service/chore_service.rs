//! Weekly run orchestration.
//!
//! # Responsibility
//! - Run the scoped sequence: load counters, schedule, persist, publish.
//! - Offer a read-only status view over the current counters.
//!
//! # Invariants
//! - In-memory counters only change after `persist` succeeds.
//! - Persistence errors are returned to the caller, never swallowed.

use crate::model::catalog::ChoreCatalog;
use crate::model::run::ScheduleRun;
use crate::overdue::store::{OverdueEntry, OverdueStore, StoreError};
use crate::repo::{CounterLog, LogError};
use crate::schedule::participants::ParticipantSet;
use crate::schedule::scheduler::{is_due, Scheduler};
use crate::schedule::ScheduleError;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Schedule(ScheduleError),
    Store(StoreError),
    /// The counter log could not be read or decoded.
    LoadLog(LogError),
    /// The counter log rejected the new counters.
    PersistLog(LogError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schedule(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::LoadLog(err) => write!(f, "failed to read overdue counters: {err}"),
            Self::PersistLog(err) => write!(f, "failed to persist overdue counters: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schedule(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::LoadLog(err) | Self::PersistLog(err) => Some(err),
        }
    }
}

impl From<ScheduleError> for ServiceError {
    fn from(value: ScheduleError) -> Self {
        Self::Schedule(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Current state of one chore, without scheduling anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoreStatus {
    pub chore: String,
    pub frequency_days: u32,
    pub days_overdue: u32,
    pub due: bool,
    pub dedicated_owner: Option<String>,
}

/// Use-case service for one household's counter log.
pub struct ChoreService<L: CounterLog> {
    log: L,
    scheduler: Scheduler,
}

impl<L: CounterLog> ChoreService<L> {
    pub fn new(log: L, scheduler: Scheduler) -> Self {
        Self { log, scheduler }
    }

    /// Loads counters from the log and merges them against `catalog`.
    ///
    /// A missing log yields an all-due store.
    pub fn load_store(&self, catalog: &ChoreCatalog) -> ServiceResult<OverdueStore> {
        let entries: Vec<OverdueEntry> = self
            .log
            .load_entries()
            .map_err(ServiceError::LoadLog)?
            .unwrap_or_default();
        Ok(OverdueStore::load(entries, catalog))
    }

    /// Schedules one period and persists the new counters.
    ///
    /// # Errors
    /// - `Schedule` when no valid assignment exists; nothing is persisted.
    /// - `LoadLog` when the counter log cannot be read.
    /// - `PersistLog` when writing the counter log fails.
    pub fn new_week(
        &mut self,
        catalog: &ChoreCatalog,
        participants: &ParticipantSet,
    ) -> ServiceResult<ScheduleRun> {
        let store = self.load_store(catalog)?;
        let outcome = self.scheduler.schedule(catalog, &store, participants)?;

        let mut candidate = store.clone();
        candidate.apply_updates(&outcome.updates)?;

        let run = ScheduleRun {
            run_id: Uuid::new_v4(),
            period_days: self.scheduler.period_days(),
            chores: catalog.all_chores().cloned().collect(),
            previous: store.snapshot(),
            assignment: outcome.assignment,
            updated: candidate.snapshot(),
        };

        if let Err(err) = self.log.persist(&run) {
            error!(
                "event=new_week module=service status=error run_id={} error_code=persist_failed error={}",
                run.run_id, err
            );
            return Err(ServiceError::PersistLog(err));
        }

        info!(
            "event=new_week module=service status=ok run_id={} assigned={} spread={}",
            run.run_id,
            run.assignment.len(),
            run.assignment.load_spread()
        );
        Ok(run)
    }

    /// Reports counters and due state without mutating the log.
    pub fn status(&self, catalog: &ChoreCatalog) -> ServiceResult<Vec<ChoreStatus>> {
        let store = self.load_store(catalog)?;
        catalog
            .all_chores()
            .map(|chore| -> ServiceResult<ChoreStatus> {
                let days_overdue = store.days_overdue(&chore.name)?;
                Ok(ChoreStatus {
                    chore: chore.name.clone(),
                    frequency_days: chore.frequency_days,
                    days_overdue,
                    due: is_due(chore, days_overdue),
                    dedicated_owner: chore.dedicated_owner.clone(),
                })
            })
            .collect()
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_log(self) -> L {
        self.log
    }
}
