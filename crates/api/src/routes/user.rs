//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`. All require auth.
///
/// ```text
/// GET /{id}            -> get_by_id
/// GET /{id}/expenses   -> list_expenses
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(user::get_by_id))
        .route("/{id}/expenses", get(user::list_expenses))
}
