//! Persistence layer: sqlx models, repositories, and the lifecycle engine.
//!
//! The workspace runs on SQLite. All timestamps are bound from Rust as UTC
//! values; the database never stamps a clock of its own, so lifecycle
//! decisions stay testable and deterministic.

pub mod engine;
pub mod models;
pub mod repositories;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

/// Shared connection pool type used across the workspace.
pub type DbPool = sqlx::SqlitePool;

/// Workspace migrations, embedded at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Open a connection pool against `database_url` (e.g. `sqlite://faultdesk.db`).
///
/// WAL journaling keeps readers from blocking the single writer; the busy
/// timeout serialises concurrent write transactions instead of failing fast.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Apply any pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Cheap liveness probe used by the health endpoint and startup checks.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}
