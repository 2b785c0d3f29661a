//! Ordered participant set.

use crate::model::chore::ParticipantId;
use crate::schedule::{ScheduleError, ScheduleResult};
use std::collections::HashSet;

/// Participants eligible for load-balanced chores.
///
/// Order matters: on equal load the earlier participant wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantSet {
    ids: Vec<ParticipantId>,
}

impl ParticipantSet {
    /// Builds a set from ids, trimming whitespace.
    ///
    /// # Errors
    /// - `InvalidParticipant` for a blank id.
    /// - `DuplicateParticipant` when an id repeats.
    pub fn new<I, S>(ids: I) -> ScheduleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for id in ids {
            let id = id.as_ref().trim();
            if id.is_empty() {
                return Err(ScheduleError::InvalidParticipant);
            }
            if !seen.insert(id.to_string()) {
                return Err(ScheduleError::DuplicateParticipant(id.to_string()));
            }
            ordered.push(id.to_string());
        }
        Ok(Self { ids: ordered })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParticipantId> {
        self.ids.iter()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
