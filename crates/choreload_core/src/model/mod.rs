//! Domain model for chore definitions and scheduling runs.
//!
//! # Responsibility
//! - Define the validated chore record and its raw input shape.
//! - Hold the immutable per-run catalog and the run record.
//!
//! # Invariants
//! - A `Chore` is only constructed through catalog validation.
//! - Chore names are unique within one catalog.

pub mod catalog;
pub mod chore;
pub mod run;
