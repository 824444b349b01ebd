use std::sync::Arc;

use duebook_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Expense and user storage (Postgres or in-memory).
    pub store: Store,
    /// Server configuration (JWT settings, default due-soon threshold).
    pub config: Arc<ServerConfig>,
}
