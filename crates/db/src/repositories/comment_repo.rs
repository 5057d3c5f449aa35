//! Repository for the `comments` table.

use faultdesk_core::comment::{VISIBILITY_INTERNAL, VISIBILITY_PUBLIC};
use faultdesk_core::types::{DbId, Timestamp};
use sqlx::{Sqlite, Transaction};

use crate::models::comment::{Comment, CommentDetail, CreateComment};
use crate::DbPool;

/// Column list for raw `comments` queries.
const COLUMNS: &str = "\
    id, report_id, author_id, body, visibility, parent_comment_id, \
    is_edited, edited_at, is_deleted, created_at";

/// Column list for the joined detail view.
const DETAIL_COLUMNS: &str = "\
    c.id, c.report_id, c.author_id, u.name AS author_name, u.role AS author_role, \
    c.body, c.visibility, c.parent_comment_id, c.is_edited, c.edited_at, c.created_at";

/// Provides CRUD operations for report comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Add a comment to a report, returning the created row.
    pub async fn create(
        pool: &DbPool,
        report_id: DbId,
        author_id: DbId,
        input: &CreateComment,
        now: Timestamp,
    ) -> Result<Comment, sqlx::Error> {
        let visibility = input.visibility.as_deref().unwrap_or(VISIBILITY_PUBLIC);
        let query = format!(
            "INSERT INTO comments \
                (report_id, author_id, body, visibility, parent_comment_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(report_id)
            .bind(author_id)
            .bind(&input.body)
            .bind(visibility)
            .bind(input.parent_comment_id)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Insert a transition's action note inside the engine transaction.
    ///
    /// Action notes are always public: the reporter is the audience.
    pub async fn create_action_note(
        tx: &mut Transaction<'_, Sqlite>,
        report_id: DbId,
        author_id: DbId,
        body: &str,
        now: Timestamp,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (report_id, author_id, body, visibility, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(report_id)
            .bind(author_id)
            .bind(body)
            .bind(VISIBILITY_PUBLIC)
            .bind(now)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a comment by ID, excluding soft-deleted rows.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1 AND is_deleted = 0");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a report's comments newest-first, with author names joined.
    ///
    /// Internal comments are staff working notes; pass
    /// `include_internal = false` for the reporter-facing view.
    pub async fn list_by_report(
        pool: &DbPool,
        report_id: DbId,
        include_internal: bool,
    ) -> Result<Vec<CommentDetail>, sqlx::Error> {
        let visibility_clause = if include_internal {
            "c.visibility IN ($2, $3)"
        } else {
            "c.visibility = $2"
        };
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.report_id = $1 AND c.is_deleted = 0 AND {visibility_clause} \
             ORDER BY c.created_at DESC, c.id DESC"
        );
        let mut q = sqlx::query_as::<_, CommentDetail>(&query)
            .bind(report_id)
            .bind(VISIBILITY_PUBLIC);
        if include_internal {
            q = q.bind(VISIBILITY_INTERNAL);
        }
        q.fetch_all(pool).await
    }

    /// List replies to a comment, oldest first.
    pub async fn list_thread(
        pool: &DbPool,
        parent_comment_id: DbId,
    ) -> Result<Vec<CommentDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.parent_comment_id = $1 AND c.is_deleted = 0 \
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, CommentDetail>(&query)
            .bind(parent_comment_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a comment's body, marking it edited.
    pub async fn edit(
        pool: &DbPool,
        id: DbId,
        body: &str,
        now: Timestamp,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET body = $2, is_edited = 1, edited_at = $3 \
             WHERE id = $1 AND is_deleted = 0 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(body)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a comment. Returns `false` if already deleted or missing.
    pub async fn soft_delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE comments SET is_deleted = 1 WHERE id = $1 AND is_deleted = 0")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The most recent non-deleted public comment on a report, if any.
    ///
    /// This drives the derived "last action" field on report listings.
    pub async fn last_public_action(
        pool: &DbPool,
        report_id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments \
             WHERE report_id = $1 AND visibility = $2 AND is_deleted = 0 \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(report_id)
            .bind(VISIBILITY_PUBLIC)
            .fetch_optional(pool)
            .await
    }
}
