use std::sync::Arc;

use faultdesk_db::engine::LifecycleEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: faultdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The lifecycle engine with the configured policy knobs.
    pub engine: LifecycleEngine,
}
