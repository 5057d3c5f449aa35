//! Actor-resolution extractor for Axum handlers.
//!
//! Token validation happens upstream (the identity provider terminates the
//! OAuth flow); this service receives the authenticated user's ID in the
//! `x-user-id` header and resolves it against the local `users` table. The
//! resolved actor is an explicit value passed into every lifecycle call,
//! never ambient state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use faultdesk_core::error::CoreError;
use faultdesk_core::types::DbId;
use faultdesk_db::repositories::UserRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the upstream-authenticated user ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated actor resolved from the `x-user-id` header.
///
/// Use this as an extractor parameter in any handler that requires an actor:
///
/// ```ignore
/// async fn my_handler(actor: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = actor.user_id, role = %actor.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The actor's internal database id.
    pub user_id: DbId,
    /// The actor's role name (`admin`, `technician`, `reporter`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {USER_ID_HEADER} header"
                )))
            })?;

        let user_id: DbId = header.parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Invalid {USER_ID_HEADER} header"
            )))
        })?;

        let user = UserRepo::find_active_by_id(&state.pool, user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}
