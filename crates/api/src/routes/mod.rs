pub mod catalog;
pub mod health;
pub mod reports;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reports                      file (POST), list (GET)
/// /reports/{id}                 detail (GET), transition (PUT, staff),
///                               soft delete (DELETE, admin)
/// /reports/folio/{folio}        detail by folio (GET)
/// /reports/{id}/history         audit trail (GET)
/// /reports/{id}/comments        list (GET), add (POST)
///
/// /stats                        dashboard statistics (GET)
///
/// /catalog/states               active states (GET)
/// /catalog/priorities           active priorities (GET)
/// /catalog/categories           active categories (GET)
/// /catalog/buildings            active buildings (GET)
/// /catalog/rooms                active rooms (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reports", reports::router())
        .nest("/stats", stats::router())
        .nest("/catalog", catalog::router())
}
