//! Row models and DTOs.

pub mod expense;
pub mod user;
