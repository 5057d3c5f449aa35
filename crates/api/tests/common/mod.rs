//! Shared helpers for API integration tests.
//!
//! Builds the real application router (same middleware stack as production)
//! over the migrated test database that `#[sqlx::test]` provides.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use faultdesk_core::types::DbId;
use faultdesk_db::engine::LifecycleEngine;
use faultdesk_db::models::user::CreateUser;
use faultdesk_db::repositories::UserRepo;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use faultdesk_api::config::ServerConfig;
use faultdesk_api::middleware::auth::USER_ID_HEADER;
use faultdesk_api::router::build_app_router;
use faultdesk_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        overdue_after_days: 7,
    }
}

/// Build the full application router over the given pool, mirroring the
/// production construction in `main.rs`.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        engine: LifecycleEngine::default(),
    };
    build_app_router(state, &config)
}

/// Provision a user directly through the repository (the identity provider
/// stand-in for tests). Returns the new user's ID.
pub async fn seed_user(pool: &SqlitePool, name: &str, email: &str, role: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            role: Some(role.to_string()),
        },
        chrono::Utc::now(),
    )
    .await
    .unwrap()
    .id
}

/// Issue an unauthenticated GET.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a GET with the given actor.
pub async fn get_as(app: &Router, uri: &str, user_id: DbId) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(USER_ID_HEADER, user_id.to_string())
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a JSON request with the given method and actor.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    user_id: DbId,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(USER_ID_HEADER, user_id.to_string())
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a bodyless request with the given method and actor.
pub async fn send_as(app: &Router, method: Method, uri: &str, user_id: DbId) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(USER_ID_HEADER, user_id.to_string())
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
