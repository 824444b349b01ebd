/// Errors surfaced by [`crate::Store`] regardless of backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A Postgres error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was violated in the in-memory backend.
    #[error("Duplicate value: {0}")]
    Duplicate(String),
}
