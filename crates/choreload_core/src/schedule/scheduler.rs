//! Due-set selection and greedy load balancing.
//!
//! # Responsibility
//! - Decide which chores are due and who takes them.
//! - Request counter resets for due chores and increments for the rest.
//!
//! # Invariants
//! - A chore is due iff `days_overdue >= frequency_days`.
//! - Dedicated chores always go to their owner and count toward that owner's load.
//! - Remaining chores are placed heaviest first (ties by name) on the least
//!   loaded participant (ties by participant order). The resulting spread
//!   never exceeds the heaviest balanced chore.
//! - Identical inputs give identical output.

use crate::model::catalog::ChoreCatalog;
use crate::model::chore::Chore;
use crate::overdue::store::{CounterUpdate, OverdueStore};
use crate::schedule::assignment::{AssignedChore, Assignment, ParticipantLoad};
use crate::schedule::participants::ParticipantSet;
use crate::schedule::{ScheduleError, ScheduleResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Days between two scheduling runs.
pub const DEFAULT_PERIOD_DAYS: u32 = 7;

/// Returns whether `chore` is due given its current counter.
pub fn is_due(chore: &Chore, days_overdue: u32) -> bool {
    days_overdue >= chore.frequency_days
}

/// Assignment plus the counter changes the run requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub assignment: Assignment,
    /// One update per catalog chore, in catalog order.
    pub updates: Vec<CounterUpdate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    period_days: u32,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            period_days: DEFAULT_PERIOD_DAYS,
        }
    }
}

impl Scheduler {
    /// # Errors
    /// - `InvalidPeriod` when `period_days == 0`.
    pub fn new(period_days: u32) -> ScheduleResult<Self> {
        if period_days == 0 {
            return Err(ScheduleError::InvalidPeriod);
        }
        Ok(Self { period_days })
    }

    pub fn period_days(&self) -> u32 {
        self.period_days
    }

    /// Computes this period's assignment.
    ///
    /// The store is only read; callers apply `updates` themselves.
    ///
    /// # Errors
    /// - `NoParticipants` when non-dedicated chores are due and `participants` is empty.
    /// - `Store` when `store` was loaded against a different catalog.
    pub fn schedule(
        &self,
        catalog: &ChoreCatalog,
        store: &OverdueStore,
        participants: &ParticipantSet,
    ) -> ScheduleResult<ScheduleOutcome> {
        let mut due = Vec::new();
        let mut updates = Vec::with_capacity(catalog.len());
        for chore in catalog.all_chores() {
            let previous = store.days_overdue(&chore.name)?;
            let days_overdue = if is_due(chore, previous) {
                due.push(chore);
                0
            } else {
                previous.saturating_add(self.period_days)
            };
            updates.push(CounterUpdate {
                chore: chore.name.clone(),
                previous,
                days_overdue,
            });
        }

        let mut loads = LoadTable::new(participants);
        let mut owners: HashMap<&str, usize> = HashMap::with_capacity(due.len());
        let mut pool = Vec::new();
        for chore in &due {
            match chore.dedicated_owner.as_deref() {
                Some(owner) => {
                    let slot = loads.slot_for(owner);
                    loads.add(slot, chore.weight);
                    owners.insert(chore.name.as_str(), slot);
                }
                None => pool.push(*chore),
            }
        }

        if !pool.is_empty() && participants.is_empty() {
            return Err(ScheduleError::NoParticipants {
                pending: pool.iter().map(|chore| chore.name.clone()).collect(),
            });
        }

        pool.sort_by(|left, right| {
            right
                .weight
                .total_cmp(&left.weight)
                .then_with(|| left.name.cmp(&right.name))
        });

        let mut heap: BinaryHeap<Slot> = (0..participants.len())
            .map(|position| Slot {
                load: loads.load(position),
                position,
            })
            .collect();
        for chore in &pool {
            let Some(lightest) = heap.pop() else {
                break;
            };
            loads.add(lightest.position, chore.weight);
            owners.insert(chore.name.as_str(), lightest.position);
            debug!(
                "event=schedule_pick module=scheduler chore={} participant={} load={}",
                chore.name,
                loads.id(lightest.position),
                loads.load(lightest.position)
            );
            heap.push(Slot {
                load: loads.load(lightest.position),
                position: lightest.position,
            });
        }

        let chores = due
            .iter()
            .filter_map(|chore| {
                owners.get(chore.name.as_str()).map(|&slot| AssignedChore {
                    chore: chore.name.clone(),
                    participant: loads.id(slot).to_string(),
                    weight: chore.weight,
                    dedicated: chore.is_dedicated(),
                })
            })
            .collect::<Vec<_>>();

        info!(
            "event=schedule_run module=scheduler status=ok chores={} due={} balanced={} participants={}",
            catalog.len(),
            due.len(),
            pool.len(),
            participants.len()
        );

        Ok(ScheduleOutcome {
            assignment: Assignment {
                chores,
                loads: loads.into_loads(),
            },
            updates,
        })
    }
}

/// Running load per participant, plus dedicated owners outside the set.
struct LoadTable {
    entries: Vec<ParticipantLoad>,
}

impl LoadTable {
    fn new(participants: &ParticipantSet) -> Self {
        Self {
            entries: participants
                .iter()
                .map(|id| ParticipantLoad {
                    participant: id.clone(),
                    load: 0.0,
                    chores: 0,
                })
                .collect(),
        }
    }

    fn slot_for(&mut self, id: &str) -> usize {
        if let Some(position) = self.entries.iter().position(|entry| entry.participant == id) {
            return position;
        }
        self.entries.push(ParticipantLoad {
            participant: id.to_string(),
            load: 0.0,
            chores: 0,
        });
        self.entries.len() - 1
    }

    fn add(&mut self, slot: usize, weight: f64) {
        let entry = &mut self.entries[slot];
        entry.load += weight;
        entry.chores += 1;
    }

    fn load(&self, slot: usize) -> f64 {
        self.entries[slot].load
    }

    fn id(&self, slot: usize) -> &str {
        &self.entries[slot].participant
    }

    fn into_loads(self) -> Vec<ParticipantLoad> {
        self.entries
    }
}

/// Heap entry ordered so the lightest, earliest participant pops first.
#[derive(Debug, Clone, Copy)]
struct Slot {
    load: f64,
    position: usize,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys.
        other
            .load
            .total_cmp(&self.load)
            .then_with(|| other.position.cmp(&self.position))
    }
}
