//! Handlers for report comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use faultdesk_core::comment::{validate_body, validate_visibility, VISIBILITY_INTERNAL, VISIBILITY_PUBLIC};
use faultdesk_core::error::CoreError;
use faultdesk_core::roles::is_staff;
use faultdesk_core::types::DbId;
use faultdesk_db::models::comment::CreateComment;
use faultdesk_db::repositories::{CommentRepo, ReportRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::reports::ensure_can_view;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /reports/:id/comments
// ---------------------------------------------------------------------------

/// List a report's comments, newest first.
///
/// Staff see internal working notes as well; reporters only see public
/// comments.
pub async fn list_comments(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(report_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let report = ReportRepo::find_by_id(&state.pool, report_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Report" }))?;
    ensure_can_view(&auth, report.reporter_id)?;

    let include_internal = is_staff(&auth.role);
    let comments = CommentRepo::list_by_report(&state.pool, report_id, include_internal).await?;
    Ok(Json(DataResponse { data: comments }))
}

// ---------------------------------------------------------------------------
// POST /reports/:id/comments
// ---------------------------------------------------------------------------

/// Add a comment to a report. Internal visibility is staff-only.
pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(report_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    validate_body(&input.body)?;

    let visibility = input.visibility.as_deref().unwrap_or(VISIBILITY_PUBLIC);
    validate_visibility(visibility)?;
    if visibility == VISIBILITY_INTERNAL && !is_staff(&auth.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Internal notes are staff-only".into(),
        )));
    }

    let report = ReportRepo::find_by_id(&state.pool, report_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Report" }))?;
    ensure_can_view(&auth, report.reporter_id)?;

    if let Some(parent_id) = input.parent_comment_id {
        let parent = CommentRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation("Parent comment not found".into()))
            })?;
        if parent.report_id != report_id {
            return Err(AppError::Core(CoreError::Validation(
                "Parent comment belongs to a different report".into(),
            )));
        }
    }

    let comment = CommentRepo::create(&state.pool, report_id, auth.user_id, &input, Utc::now())
        .await?;

    tracing::info!(
        comment_id = comment.id,
        report_id,
        user_id = auth.user_id,
        visibility = %comment.visibility,
        "Comment added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
