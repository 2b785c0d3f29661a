//! Record of one scheduling run.

use crate::model::chore::Chore;
use crate::overdue::store::OverdueSnapshot;
use crate::schedule::assignment::Assignment;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one run, used by run history.
pub type RunId = Uuid;

/// Everything one invocation produced, owned by that invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRun {
    pub run_id: RunId,
    pub period_days: u32,
    /// Catalog as it was when the run started.
    pub chores: Vec<Chore>,
    pub previous: OverdueSnapshot,
    pub assignment: Assignment,
    pub updated: OverdueSnapshot,
}
