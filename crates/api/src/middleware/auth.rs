//! Bearer-token extractor for Axum handlers.
//!
//! A token is accepted only when its signature and expiry check out AND the
//! user it names still exists with the email it was issued for. User ids are
//! reissued from 1 when the in-memory store starts over, so the id alone does
//! not identify an account across restarts.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use duebook_core::error::CoreError;
use duebook_core::types::DbId;
use duebook_db::models::user::User;

use crate::auth::jwt::{validate_token, Claims};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The signed-in user, resolved from the `Authorization: Bearer <token>` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// The stored account the token resolved to.
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let user = resolve_user(state, &claims).await?;

        Ok(AuthUser {
            user_id: user.id,
            user,
        })
    }
}

fn bearer_token(parts: &Parts) -> AppResult<&str> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

/// Load the user named by `claims.sub` and require the email to match.
async fn resolve_user(state: &AppState, claims: &Claims) -> AppResult<User> {
    match state.store.find_user(claims.sub).await? {
        Some(user) if user.email == claims.email => Ok(user),
        Some(_) => {
            tracing::warn!(user_id = claims.sub, "Token email does not match stored user");
            Err(unauthorized("Invalid or expired token"))
        }
        None => Err(unauthorized("Invalid or expired token")),
    }
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
