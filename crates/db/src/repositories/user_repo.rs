//! Repository for the `users` table.

use faultdesk_core::roles::ROLE_REPORTER;
use faultdesk_core::types::{DbId, Timestamp};

use crate::models::user::{CreateUser, User};
use crate::DbPool;

/// Column list for `users` queries.
const COLUMNS: &str = "id, name, email, role, is_active, created_at";

/// Provides lookup and provisioning operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Provision a user, returning the full row.
    ///
    /// The identity provider calls this the first time it sees a login that
    /// has no local row yet.
    pub async fn create(
        pool: &DbPool,
        input: &CreateUser,
        now: Timestamp,
    ) -> Result<User, sqlx::Error> {
        let role = input.role.as_deref().unwrap_or(ROLE_REPORTER);
        let query = format!(
            "INSERT INTO users (name, email, role, is_active, created_at) \
             VALUES ($1, $2, $3, 1, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(role)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find an active user by ID. Used for actor resolution.
    pub async fn find_active_by_id(pool: &DbPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND is_active = 1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email, active or not.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
