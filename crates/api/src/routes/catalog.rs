//! Route definitions for the read-only catalog.
//!
//! Mounted at `/catalog` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/states", get(catalog::list_states))
        .route("/priorities", get(catalog::list_priorities))
        .route("/categories", get(catalog::list_categories))
        .route("/buildings", get(catalog::list_buildings))
        .route("/rooms", get(catalog::list_rooms))
}
