//! Handlers for the read-only catalog endpoints.
//!
//! These feed the report form (state/priority selects, building and room
//! pickers). Catalog administration itself lives outside this service.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use faultdesk_core::types::DbId;
use faultdesk_db::repositories::CatalogRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /catalog/states -- active workflow states in order.
pub async fn list_states(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let states = CatalogRepo::list_states(&state.pool).await?;
    Ok(Json(DataResponse { data: states }))
}

/// GET /catalog/priorities -- active priorities by level.
pub async fn list_priorities(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let priorities = CatalogRepo::list_priorities(&state.pool).await?;
    Ok(Json(DataResponse { data: priorities }))
}

/// GET /catalog/categories -- active categories.
pub async fn list_categories(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CatalogRepo::list_categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /catalog/buildings -- active buildings.
pub async fn list_buildings(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let buildings = CatalogRepo::list_buildings(&state.pool).await?;
    Ok(Json(DataResponse { data: buildings }))
}

/// Query parameters for the room listing.
#[derive(Debug, Deserialize)]
pub struct RoomListParams {
    pub building_id: Option<DbId>,
}

/// GET /catalog/rooms -- active rooms, optionally per building.
pub async fn list_rooms(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RoomListParams>,
) -> AppResult<impl IntoResponse> {
    let rooms = CatalogRepo::list_rooms(&state.pool, params.building_id).await?;
    Ok(Json(DataResponse { data: rooms }))
}
