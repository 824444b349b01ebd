//! Request handlers.
//!
//! Handlers validate input, delegate to the [`duebook_db::Store`] on
//! [`crate::state::AppState`] and map errors via [`crate::error::AppError`].

pub mod auth;
pub mod expense;
pub mod user;
