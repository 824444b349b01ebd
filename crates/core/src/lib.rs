//! Domain logic for the duebook expense tracker.
//!
//! This crate has no I/O: storage lives in `duebook-db` and the HTTP surface
//! in `duebook-api`. Everything here is pure and unit tested in place.

pub mod due_status;
pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
