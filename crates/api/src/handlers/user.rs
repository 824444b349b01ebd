//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use duebook_core::error::CoreError;
use duebook_core::types::DbId;
use duebook_db::models::user::UserResponse;

use crate::error::{AppError, AppResult};
use crate::handlers::expense::{list_page, ExpenseResponse};
use crate::middleware::auth::AuthUser;
use crate::query::ExpenseListParams;
use crate::response::PagedResponse;
use crate::state::AppState;

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or(AppError::Core(CoreError::user_not_found(id)))?;
    Ok(Json(UserResponse::from(user)))
}

/// GET /api/v1/users/{id}/expenses
///
/// Same filters as `GET /expenses`, scoped to one creator.
pub async fn list_expenses(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<ExpenseListParams>,
) -> AppResult<Json<PagedResponse<ExpenseResponse>>> {
    if state.store.find_user(id).await?.is_none() {
        return Err(AppError::Core(CoreError::user_not_found(id)));
    }
    let page = list_page(&state, params, Some(id)).await?;
    Ok(Json(page))
}
