//! Weekly chore allocation.
//!
//! # Responsibility
//! - Select due chores, bind dedicated chores to their owners and balance the
//!   rest over the participant set.
//! - Compute the counter updates a run requests.
//!
//! # Invariants
//! - Scheduling is a pure function of catalog, counters and participant order.
//! - Failures return no partial assignment.

use crate::overdue::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assignment;
pub mod participants;
pub mod scheduler;

pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Non-dedicated chores are due but nobody can take them.
    NoParticipants { pending: Vec<String> },
    InvalidParticipant,
    DuplicateParticipant(String),
    /// The scheduling period must be at least one day.
    InvalidPeriod,
    Store(StoreError),
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoParticipants { pending } => write!(
                f,
                "no participants available for {} due chore(s): {}",
                pending.len(),
                pending.join(", ")
            ),
            Self::InvalidParticipant => write!(f, "participant id must not be empty"),
            Self::DuplicateParticipant(id) => write!(f, "participant is listed twice: {id}"),
            Self::InvalidPeriod => write!(f, "scheduling period must be at least one day"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ScheduleError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
