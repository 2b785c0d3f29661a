//! Scheduler output: who does what this week.

use serde::{Deserialize, Serialize};

/// One due chore bound to one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedChore {
    pub chore: String,
    pub participant: String,
    pub weight: f64,
    /// `true` when the chore went to its dedicated owner.
    pub dedicated: bool,
}

/// Total assigned weight for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantLoad {
    pub participant: String,
    pub load: f64,
    pub chores: usize,
}

/// Chore-to-participant mapping for the due chores of one run.
///
/// `chores` follows catalog order. `loads` lists the participant set in its
/// own order, followed by dedicated owners outside that set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub(crate) chores: Vec<AssignedChore>,
    pub(crate) loads: Vec<ParticipantLoad>,
}

impl Assignment {
    pub fn chores(&self) -> &[AssignedChore] {
        &self.chores
    }

    pub fn loads(&self) -> &[ParticipantLoad] {
        &self.loads
    }

    pub fn participant_for(&self, chore: &str) -> Option<&str> {
        self.chores
            .iter()
            .find(|assigned| assigned.chore == chore)
            .map(|assigned| assigned.participant.as_str())
    }

    pub fn load_of(&self, participant: &str) -> Option<f64> {
        self.loads
            .iter()
            .find(|entry| entry.participant == participant)
            .map(|entry| entry.load)
    }

    /// Chores assigned to `participant`, in catalog order.
    pub fn chores_for<'a>(
        &'a self,
        participant: &'a str,
    ) -> impl Iterator<Item = &'a AssignedChore> + 'a {
        self.chores
            .iter()
            .filter(move |assigned| assigned.participant == participant)
    }

    /// Difference between the highest and lowest load in `loads`.
    pub fn load_spread(&self) -> f64 {
        let mut loads = self.loads.iter().map(|entry| entry.load);
        let Some(first) = loads.next() else {
            return 0.0;
        };
        let (min, max) = loads.fold((first, first), |(min, max), load| {
            (min.min(load), max.max(load))
        });
        max - min
    }

    pub fn is_empty(&self) -> bool {
        self.chores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chores.len()
    }
}
