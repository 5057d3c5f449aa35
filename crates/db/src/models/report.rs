//! Report entity model, DTOs, and the joined detail view.

use faultdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A raw row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub folio: String,
    pub building_id: Option<DbId>,
    pub room_id: Option<DbId>,
    pub location_detail: Option<String>,
    pub category_id: DbId,
    pub subcategory: Option<String>,
    pub title: Option<String>,
    pub description: String,
    pub priority_id: DbId,
    pub state_id: DbId,
    pub reporter_id: DbId,
    pub assignee_id: Option<DbId>,
    pub created_at: Timestamp,
    pub assigned_at: Option<Timestamp>,
    pub finalized_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub updated_by: Option<DbId>,
    pub row_version: i64,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for filing a new report.
#[derive(Debug, Deserialize)]
pub struct CreateReport {
    pub building_id: Option<DbId>,
    pub room_id: Option<DbId>,
    pub location_detail: Option<String>,
    pub category_id: DbId,
    pub subcategory: Option<String>,
    pub title: Option<String>,
    pub description: String,
    /// Defaults to the seeded Medium priority when absent.
    pub priority_id: Option<DbId>,
}

/// DTO for a lifecycle transition (state / priority / assignment change).
#[derive(Debug, Deserialize)]
pub struct TransitionReport {
    pub state_id: DbId,
    pub priority_id: DbId,
    /// New assignee; `None` clears the assignment.
    pub assignee_id: Option<DbId>,
    /// Optional action note, inserted as a public comment and echoed into
    /// the history entry.
    pub comment: Option<String>,
    /// Optimistic-concurrency guard: when present, the transition fails with
    /// a conflict if the report has been modified since this version was
    /// read.
    pub expected_version: Option<i64>,
}

/// Resolved workflow column values applied by a transition.
///
/// Built by the lifecycle engine after policy and timestamp decisions; the
/// repository applies it with a version-guarded UPDATE.
#[derive(Debug)]
pub struct WorkflowUpdate {
    pub state_id: DbId,
    pub priority_id: DbId,
    pub assignee_id: Option<DbId>,
    pub updated_by: DbId,
    pub updated_at: Timestamp,
    pub assigned_at: Option<Timestamp>,
    pub finalized_at: Option<Timestamp>,
    /// The `row_version` the caller read; the UPDATE matches on it and
    /// increments it.
    pub expected_version: i64,
}

/// Query parameters for listing reports.
#[derive(Debug, Default, Deserialize)]
pub struct ReportListParams {
    pub reporter_id: Option<DbId>,
    /// Exact state name, e.g. `"Received"`.
    pub state: Option<String>,
    /// Category dashboard type, e.g. `"infrastructure"`.
    pub dashboard_type: Option<String>,
    pub building_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A report row joined with catalog and user names, plus the derived
/// last-public-action fields. This is what list and detail endpoints serve.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportDetail {
    pub id: DbId,
    pub folio: String,
    pub building_id: Option<DbId>,
    pub building_name: Option<String>,
    pub room_id: Option<DbId>,
    pub room_name: Option<String>,
    pub location_detail: Option<String>,
    pub category_id: DbId,
    pub category_name: String,
    pub dashboard_type: Option<String>,
    pub subcategory: Option<String>,
    pub title: Option<String>,
    pub description: String,
    pub priority_id: DbId,
    pub priority_name: String,
    pub state_id: DbId,
    pub state_name: String,
    pub is_terminal: bool,
    pub reporter_id: DbId,
    pub reporter_name: String,
    pub assignee_id: Option<DbId>,
    pub assignee_name: Option<String>,
    pub created_at: Timestamp,
    pub assigned_at: Option<Timestamp>,
    pub finalized_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub updated_by: Option<DbId>,
    pub row_version: i64,
    /// Body of the most recent non-deleted public comment, if any.
    pub last_public_action: Option<String>,
    pub last_public_action_at: Option<Timestamp>,
}
