//! In-memory overdue counter store.
//!
//! # Responsibility
//! - Seed counters for new chores with an "always due" sentinel.
//! - Apply counter updates atomically.
//! - Produce immutable snapshots for persistence backends.
//!
//! # Invariants
//! - Entry order equals catalog order.
//! - `apply_updates` either applies every update or none.

use crate::model::catalog::ChoreCatalog;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Counter value given to chores without history.
///
/// Larger than any realistic frequency, so an unseen chore is always due.
pub const SENTINEL_DAYS_OVERDUE: u32 = 999;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Lookup or update for a chore outside the catalog.
    UnknownChore(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownChore(name) => write!(f, "chore is not in the catalog: {name}"),
        }
    }
}

impl Error for StoreError {}

/// One `(chore, days_overdue)` pair, as read from or written to a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueEntry {
    pub chore: String,
    pub days_overdue: u32,
}

impl OverdueEntry {
    pub fn new(chore: impl Into<String>, days_overdue: u32) -> Self {
        Self {
            chore: chore.into(),
            days_overdue,
        }
    }
}

/// Requested counter change produced by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterUpdate {
    pub chore: String,
    pub previous: u32,
    pub days_overdue: u32,
}

/// Immutable copy of all counters in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueSnapshot {
    entries: Vec<OverdueEntry>,
}

impl OverdueSnapshot {
    pub fn entries(&self) -> &[OverdueEntry] {
        &self.entries
    }

    pub fn get(&self, chore: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.chore == chore)
            .map(|entry| entry.days_overdue)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mutable counter state for one household.
///
/// Not synchronized: use one instance per household and per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdueStore {
    entries: Vec<OverdueEntry>,
    index: HashMap<String, usize>,
}

impl OverdueStore {
    /// Merges persisted entries against `catalog`.
    ///
    /// - Catalog chores without an entry start at `SENTINEL_DAYS_OVERDUE`.
    /// - Entries for chores not in the catalog are dropped.
    /// - When one chore appears several times, the last entry wins.
    pub fn load<I>(raw_entries: I, catalog: &ChoreCatalog) -> Self
    where
        I: IntoIterator<Item = OverdueEntry>,
    {
        let mut persisted = HashMap::new();
        let mut stale = 0_usize;
        for entry in raw_entries {
            if catalog.contains(&entry.chore) {
                persisted.insert(entry.chore, entry.days_overdue);
            } else {
                stale += 1;
            }
        }

        let mut seeded = 0_usize;
        let mut entries = Vec::with_capacity(catalog.len());
        let mut index = HashMap::with_capacity(catalog.len());
        for chore in catalog.all_chores() {
            let days_overdue = match persisted.get(&chore.name) {
                Some(&days) => days,
                None => {
                    seeded += 1;
                    SENTINEL_DAYS_OVERDUE
                }
            };
            index.insert(chore.name.clone(), entries.len());
            entries.push(OverdueEntry::new(chore.name.clone(), days_overdue));
        }

        debug!(
            "event=overdue_load module=overdue status=ok chores={} seeded={} stale_dropped={}",
            entries.len(),
            seeded,
            stale
        );
        Self { entries, index }
    }

    /// Returns the counter for one catalog chore.
    ///
    /// # Errors
    /// - `UnknownChore` when `chore` is not in the catalog the store was loaded with.
    pub fn days_overdue(&self, chore: &str) -> StoreResult<u32> {
        self.index
            .get(chore)
            .map(|&position| self.entries[position].days_overdue)
            .ok_or_else(|| StoreError::UnknownChore(chore.to_string()))
    }

    /// Replaces counters for the given chores.
    ///
    /// All names are checked before anything is written, so an error leaves
    /// the store untouched.
    pub fn apply_updates(&mut self, updates: &[CounterUpdate]) -> StoreResult<()> {
        let mut next = self.entries.clone();
        for update in updates {
            let position = *self
                .index
                .get(&update.chore)
                .ok_or_else(|| StoreError::UnknownChore(update.chore.clone()))?;
            next[position].days_overdue = update.days_overdue;
        }
        self.entries = next;
        Ok(())
    }

    pub fn snapshot(&self) -> OverdueSnapshot {
        OverdueSnapshot {
            entries: self.entries.clone(),
        }
    }

    /// Iterates `(chore, days_overdue)` in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.chore.as_str(), entry.days_overdue))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CounterUpdate, OverdueEntry, OverdueStore, StoreError};
    use crate::model::catalog::ChoreCatalog;
    use crate::model::chore::RawChoreRow;

    fn catalog() -> ChoreCatalog {
        ChoreCatalog::load([
            RawChoreRow::new("Dishes", 7_i64, "", 1_i64),
            RawChoreRow::new("Windows", 28_i64, "", 3_i64),
        ])
        .expect("fixture catalog should load")
    }

    #[test]
    fn last_duplicate_entry_wins() {
        let store = OverdueStore::load(
            [
                OverdueEntry::new("Dishes", 3),
                OverdueEntry::new("Dishes", 5),
            ],
            &catalog(),
        );
        assert_eq!(store.days_overdue("Dishes").unwrap(), 5);
    }

    #[test]
    fn failed_update_batch_leaves_store_untouched() {
        let mut store = OverdueStore::load([OverdueEntry::new("Dishes", 3)], &catalog());
        let before = store.snapshot();

        let err = store
            .apply_updates(&[
                CounterUpdate {
                    chore: "Dishes".to_string(),
                    previous: 3,
                    days_overdue: 0,
                },
                CounterUpdate {
                    chore: "Gutters".to_string(),
                    previous: 0,
                    days_overdue: 0,
                },
            ])
            .unwrap_err();

        assert_eq!(err, StoreError::UnknownChore("Gutters".to_string()));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn entries_follow_catalog_order() {
        let store = OverdueStore::load(
            [
                OverdueEntry::new("Windows", 1),
                OverdueEntry::new("Dishes", 2),
            ],
            &catalog(),
        );
        let names: Vec<&str> = store.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Dishes", "Windows"]);
    }
}
