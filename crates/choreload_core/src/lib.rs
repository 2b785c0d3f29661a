//! Core domain logic for choreload.
//! Weekly chore allocation balanced by effort weight and overdue state.

pub mod db;
pub mod logging;
pub mod model;
pub mod overdue;
pub mod repo;
pub mod report;
pub mod schedule;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{CatalogError, CatalogResult, ChoreCatalog};
pub use model::chore::{Chore, ChoreName, ParticipantId, RawChoreRow, RawValue};
pub use model::run::{RunId, ScheduleRun};
pub use overdue::store::{
    CounterUpdate, OverdueEntry, OverdueSnapshot, OverdueStore, StoreError, StoreResult,
    SENTINEL_DAYS_OVERDUE,
};
pub use repo::sqlite_log::{HistoricAssignment, RunSummary, SqliteCounterLog, SQLITE_LOG_FILE_NAME};
pub use repo::text_log::{TextCounterLog, TEXT_LOG_FILE_NAME};
pub use repo::{CounterLog, LogError, LogResult};
pub use report::schedule_report::ScheduleReport;
pub use schedule::assignment::{AssignedChore, Assignment, ParticipantLoad};
pub use schedule::participants::ParticipantSet;
pub use schedule::scheduler::{is_due, ScheduleOutcome, Scheduler, DEFAULT_PERIOD_DAYS};
pub use schedule::{ScheduleError, ScheduleResult};
pub use service::chore_service::{ChoreService, ChoreStatus, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
