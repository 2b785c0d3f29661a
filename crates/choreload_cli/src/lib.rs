//! Household front end for `choreload_core`.

pub mod app;
pub mod household;
