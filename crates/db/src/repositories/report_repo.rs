//! Repository for the `reports` table.
//!
//! Raw-row reads and the version-guarded workflow UPDATE live here; the
//! orchestration (validation, policy, history, atomicity) is owned by
//! [`crate::engine::LifecycleEngine`].

use faultdesk_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use faultdesk_core::types::{DbId, Timestamp};
use sqlx::{Sqlite, Transaction};

use crate::models::report::{CreateReport, Report, ReportDetail, ReportListParams, WorkflowUpdate};
use crate::DbPool;

/// Column list for raw `reports` queries.
const COLUMNS: &str = "\
    id, folio, building_id, room_id, location_detail, category_id, subcategory, \
    title, description, priority_id, state_id, reporter_id, assignee_id, \
    created_at, assigned_at, finalized_at, updated_at, updated_by, \
    row_version, is_deleted, deleted_at";

/// SELECT head for the joined detail view (no WHERE clause).
///
/// The last-public-action subqueries surface the most recent non-deleted
/// public comment, which the report list renders as "latest action taken".
const DETAIL_SELECT: &str = "\
    SELECT r.id, r.folio, \
        r.building_id, b.name AS building_name, \
        r.room_id, rm.name AS room_name, \
        r.location_detail, \
        r.category_id, c.name AS category_name, c.dashboard_type, \
        r.subcategory, r.title, r.description, \
        r.priority_id, p.name AS priority_name, \
        r.state_id, s.name AS state_name, s.is_terminal, \
        r.reporter_id, ru.name AS reporter_name, \
        r.assignee_id, au.name AS assignee_name, \
        r.created_at, r.assigned_at, r.finalized_at, r.updated_at, r.updated_by, \
        r.row_version, \
        (SELECT cm.body FROM comments cm \
            WHERE cm.report_id = r.id AND cm.visibility = 'public' AND cm.is_deleted = 0 \
            ORDER BY cm.created_at DESC, cm.id DESC LIMIT 1) AS last_public_action, \
        (SELECT cm.created_at FROM comments cm \
            WHERE cm.report_id = r.id AND cm.visibility = 'public' AND cm.is_deleted = 0 \
            ORDER BY cm.created_at DESC, cm.id DESC LIMIT 1) AS last_public_action_at \
    FROM reports r \
    JOIN categories c ON c.id = r.category_id \
    JOIN states s ON s.id = r.state_id \
    JOIN priorities p ON p.id = r.priority_id \
    JOIN users ru ON ru.id = r.reporter_id \
    LEFT JOIN buildings b ON b.id = r.building_id \
    LEFT JOIN rooms rm ON rm.id = r.room_id \
    LEFT JOIN users au ON au.id = r.assignee_id";

/// Provides row-level operations for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new report in its initial workflow position.
    ///
    /// Fails with a unique-constraint violation if `folio` already exists;
    /// the caller regenerates and retries.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        pool: &DbPool,
        folio: &str,
        reporter_id: DbId,
        state_id: DbId,
        priority_id: DbId,
        created_at: Timestamp,
        input: &CreateReport,
    ) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports \
                (folio, building_id, room_id, location_detail, category_id, subcategory, \
                 title, description, priority_id, state_id, reporter_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(folio)
            .bind(input.building_id)
            .bind(input.room_id)
            .bind(&input.location_detail)
            .bind(input.category_id)
            .bind(&input.subcategory)
            .bind(&input.title)
            .bind(&input.description)
            .bind(priority_id)
            .bind(state_id)
            .bind(reporter_id)
            .bind(created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a raw report row by ID, excluding soft-deleted rows.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1 AND is_deleted = 0");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a raw report row by ID, including soft-deleted rows.
    ///
    /// Used where soft deletion must not hide the row, e.g. the ownership
    /// check guarding the history view.
    pub async fn find_by_id_include_deleted(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a report inside a transition transaction, excluding soft-deleted
    /// rows.
    pub async fn find_for_update(
        tx: &mut Transaction<'_, Sqlite>,
        id: DbId,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1 AND is_deleted = 0");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Apply a transition's workflow columns with a version guard.
    ///
    /// Matches on `row_version` and increments it; returns `None` when the
    /// guard misses, i.e. the row changed since it was read (or vanished).
    pub async fn apply_workflow_update(
        tx: &mut Transaction<'_, Sqlite>,
        id: DbId,
        update: &WorkflowUpdate,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET \
                state_id = $3, priority_id = $4, assignee_id = $5, \
                updated_by = $6, updated_at = $7, \
                assigned_at = $8, finalized_at = $9, \
                row_version = row_version + 1 \
             WHERE id = $1 AND row_version = $2 AND is_deleted = 0 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(update.expected_version)
            .bind(update.state_id)
            .bind(update.priority_id)
            .bind(update.assignee_id)
            .bind(update.updated_by)
            .bind(update.updated_at)
            .bind(update.assigned_at)
            .bind(update.finalized_at)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Soft-delete a report. Returns `false` when the row is missing or
    /// already deleted (the operation is idempotent at the storage level).
    pub async fn soft_delete(pool: &DbPool, id: DbId, now: Timestamp) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reports SET is_deleted = 1, deleted_at = $2 \
             WHERE id = $1 AND is_deleted = 0",
        )
        .bind(id)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find the joined detail view by report ID.
    pub async fn find_detail_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<ReportDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE r.is_deleted = 0 AND r.id = $1");
        sqlx::query_as::<_, ReportDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the joined detail view by folio.
    pub async fn find_detail_by_folio(
        pool: &DbPool,
        folio: &str,
    ) -> Result<Option<ReportDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE r.is_deleted = 0 AND r.folio = $1");
        sqlx::query_as::<_, ReportDetail>(&query)
            .bind(folio)
            .fetch_optional(pool)
            .await
    }

    /// List report detail rows with optional filters, newest first.
    ///
    /// Soft-deleted rows are always excluded.
    pub async fn list_detail(
        pool: &DbPool,
        params: &ReportListParams,
    ) -> Result<Vec<ReportDetail>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(params.offset);

        let mut conditions: Vec<String> = vec!["r.is_deleted = 0".into()];
        let mut bind_idx = 1u32;
        let mut bind_values: Vec<BindValue> = Vec::new();

        if let Some(reporter_id) = params.reporter_id {
            conditions.push(format!("r.reporter_id = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::BigInt(reporter_id));
        }

        if let Some(ref state) = params.state {
            conditions.push(format!("s.name = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Text(state.clone()));
        }

        if let Some(ref dashboard_type) = params.dashboard_type {
            conditions.push(format!("c.dashboard_type = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Text(dashboard_type.clone()));
        }

        if let Some(building_id) = params.building_id {
            conditions.push(format!("r.building_id = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::BigInt(building_id));
        }

        let query = format!(
            "{DETAIL_SELECT} WHERE {} \
             ORDER BY r.created_at DESC, r.id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            conditions.join(" AND "),
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, ReportDetail>(&query);
        for value in &bind_values {
            match value {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
            }
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }
}

/// Typed bind value for the dynamically-built list query.
enum BindValue {
    BigInt(i64),
    Text(String),
}
