//! Comment entity model and DTOs.

use faultdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub report_id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub visibility: String,
    pub parent_comment_id: Option<DbId>,
    pub is_edited: bool,
    pub edited_at: Option<Timestamp>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
}

/// DTO for adding a comment to a report.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub body: String,
    /// Defaults to `public` when absent.
    pub visibility: Option<String>,
    /// Reply threading: points at the comment being answered.
    pub parent_comment_id: Option<DbId>,
}

/// A comment joined with its author's name and role.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentDetail {
    pub id: DbId,
    pub report_id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub author_role: String,
    pub body: String,
    pub visibility: String,
    pub parent_comment_id: Option<DbId>,
    pub is_edited: bool,
    pub edited_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
