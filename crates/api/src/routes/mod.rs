pub mod auth;
pub mod expense;
pub mod health;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      register (public)
/// /auth/login                       login (public)
/// /auth/me                          current user
///
/// /expenses                         list, create
/// /expenses/summary                 per-status counts and totals
/// /expenses/{id}                    get, update, delete
/// /expenses/{id}/toggle-paid        flip the paid flag (POST)
///
/// /users/{id}                       get
/// /users/{id}/expenses              list that user's expenses
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/expenses", expense::router())
        .nest("/users", user::router())
}
