//! Route definitions for dashboard statistics.
//!
//! Mounted at `/stats` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Statistics routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(stats::get_statistics))
}
