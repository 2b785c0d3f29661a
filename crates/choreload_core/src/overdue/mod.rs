//! Overdue counter state.
//!
//! # Responsibility
//! - Keep one "days since last done" counter per catalog chore.
//! - Merge persisted entries against the current catalog.
//!
//! # Invariants
//! - Every catalog chore has exactly one counter.
//! - Counters for chores missing from the catalog are never retained.
//! - The store is decoupled from any on-disk encoding; see `repo` for those.

pub mod store;
