//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate load, schedule and persist into one weekly run.
//! - Keep CLI callers decoupled from storage details.

pub mod chore_service;
