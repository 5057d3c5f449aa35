//! Handlers for the report lifecycle endpoints.
//!
//! Creation is open to any authenticated user; transitions are staff-only;
//! deletion is admin-only. Reporters only ever see their own reports.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use faultdesk_core::error::CoreError;
use faultdesk_core::folio;
use faultdesk_core::roles::is_staff;
use faultdesk_core::types::DbId;
use faultdesk_db::models::report::{CreateReport, ReportListParams, TransitionReport};
use faultdesk_db::repositories::{HistoryRepo, ReportRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /reports
// ---------------------------------------------------------------------------

/// File a new report. The actor becomes the reporter.
pub async fn create_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> AppResult<impl IntoResponse> {
    let report = state
        .engine
        .create_report(&state.pool, auth.user_id, &input)
        .await?;

    let detail = ReportRepo::find_detail_by_id(&state.pool, report.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created report could not be read back".into()))?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

// ---------------------------------------------------------------------------
// GET /reports
// ---------------------------------------------------------------------------

/// List reports with optional filters.
///
/// Staff see everything; reporters are pinned to their own reports.
pub async fn list_reports(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(mut params): Query<ReportListParams>,
) -> AppResult<impl IntoResponse> {
    if !is_staff(&auth.role) {
        params.reporter_id = Some(auth.user_id);
    }

    let reports = ReportRepo::list_detail(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: reports }))
}

// ---------------------------------------------------------------------------
// GET /reports/:id
// ---------------------------------------------------------------------------

/// Get a single report by ID.
pub async fn get_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = ReportRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Report" }))?;

    ensure_can_view(&auth, detail.reporter_id)?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// GET /reports/folio/:folio
// ---------------------------------------------------------------------------

/// Get a single report by its folio.
pub async fn get_report_by_folio(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(folio): Path<String>,
) -> AppResult<impl IntoResponse> {
    // Reject garbage before touching the database; the response is the same
    // generic not-found either way.
    if !folio::is_well_formed(&folio) {
        return Err(AppError::Core(CoreError::NotFound { entity: "Report" }));
    }

    let detail = ReportRepo::find_detail_by_folio(&state.pool, &folio)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Report" }))?;

    ensure_can_view(&auth, detail.reporter_id)?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// PUT /reports/:id
// ---------------------------------------------------------------------------

/// Apply a lifecycle transition. Staff only.
pub async fn update_report(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionReport>,
) -> AppResult<impl IntoResponse> {
    state
        .engine
        .transition(&state.pool, id, staff.user_id, &input)
        .await?;

    let detail = ReportRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::InternalError("Updated report could not be read back".into()))?;

    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// DELETE /reports/:id
// ---------------------------------------------------------------------------

/// Soft-delete a report. Admin only.
pub async fn delete_report(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.engine.soft_delete(&state.pool, id).await?;

    tracing::info!(report_id = id, user_id = admin.user_id, "Report deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /reports/:id/history
// ---------------------------------------------------------------------------

/// List a report's audit trail in insertion order.
///
/// History survives soft deletion, so the ownership check resolves the
/// report with deleted rows included.
pub async fn get_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let report = ReportRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Report" }))?;

    ensure_can_view(&auth, report.reporter_id)?;

    let history = HistoryRepo::list_by_report(&state.pool, id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// Reporters can only view their own reports; staff can view any.
pub(crate) fn ensure_can_view(auth: &AuthUser, reporter_id: DbId) -> Result<(), AppError> {
    if !is_staff(&auth.role) && reporter_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only view your own reports".into(),
        )));
    }
    Ok(())
}
