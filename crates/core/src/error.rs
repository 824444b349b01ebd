//! Domain error type shared by the storage and HTTP layers.

use crate::types::DbId;

/// Errors raised by domain logic. The API crate maps each variant to an
/// HTTP status and a stable error code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row of `entity` exists with the given id.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Caller input failed a domain rule (empty name, negative amount, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The write would violate a uniqueness rule (e.g. an email already in use).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, malformed or rejected credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CoreError {
    /// Shorthand for the not-found case of an expense lookup.
    pub fn expense_not_found(id: DbId) -> Self {
        Self::NotFound {
            entity: "Expense",
            id,
        }
    }

    /// Shorthand for the not-found case of a user lookup.
    pub fn user_not_found(id: DbId) -> Self {
        Self::NotFound { entity: "User", id }
    }
}
