//! User entity model and DTOs.
//!
//! Users are provisioned by the upstream identity provider; this table holds
//! the local mirror that reports, comments, and history reference.

use faultdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for provisioning a user on first sight.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Defaults to `reporter` when absent.
    pub role: Option<String>,
}
