//! Handler for the dashboard statistics endpoint.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use faultdesk_core::roles::is_staff;
use faultdesk_db::models::stats::StatsFilter;
use faultdesk_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /stats
// ---------------------------------------------------------------------------

/// Dashboard statistics over the active report set.
///
/// Staff may aggregate across all reporters and slice by dashboard type;
/// reporters are pinned to their own reports.
pub async fn get_statistics(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(mut filter): Query<StatsFilter>,
) -> AppResult<impl IntoResponse> {
    if !is_staff(&auth.role) {
        filter.reporter_id = Some(auth.user_id);
    }

    let stats = StatsRepo::dashboard(
        &state.pool,
        &filter,
        state.config.overdue_after_days,
        Utc::now(),
    )
    .await?;

    Ok(Json(DataResponse { data: stats }))
}
