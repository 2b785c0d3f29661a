//! Presentation views over scheduling runs.

pub mod schedule_report;
