//! Route definitions for the report lifecycle.
//!
//! Mounted at `/reports` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{comments, reports};
use crate::state::AppState;

/// Report routes.
///
/// ```text
/// POST   /                  -> create_report
/// GET    /                  -> list_reports
/// GET    /{id}              -> get_report
/// PUT    /{id}              -> update_report (staff only)
/// DELETE /{id}              -> delete_report (admin only)
/// GET    /folio/{folio}     -> get_report_by_folio
/// GET    /{id}/history      -> get_history
/// GET    /{id}/comments     -> list_comments
/// POST   /{id}/comments     -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reports::list_reports).post(reports::create_report),
        )
        .route(
            "/{id}",
            get(reports::get_report)
                .put(reports::update_report)
                .delete(reports::delete_report),
        )
        .route("/folio/{folio}", get(reports::get_report_by_folio))
        .route("/{id}/history", get(reports::get_history))
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
}
