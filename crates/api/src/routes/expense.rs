//! Route definitions for the `/expenses` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::expense;
use crate::state::AppState;

/// Routes mounted at `/expenses`. All require auth.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /summary            -> summary
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// POST   /{id}/toggle-paid   -> toggle_paid
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(expense::list).post(expense::create))
        .route("/summary", get(expense::summary))
        .route(
            "/{id}",
            get(expense::get_by_id)
                .put(expense::update)
                .delete(expense::delete),
        )
        .route("/{id}/toggle-paid", post(expense::toggle_paid))
}
