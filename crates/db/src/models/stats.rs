//! Statistics view models.

use faultdesk_core::stats::MonthBucket;
use faultdesk_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Filter parameters for the dashboard statistics view.
#[derive(Debug, Default, Deserialize)]
pub struct StatsFilter {
    pub reporter_id: Option<DbId>,
    /// Category dashboard type, e.g. `"materials"`.
    pub dashboard_type: Option<String>,
}

/// Aggregate dashboard view over the active (non-deleted) report set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: i64,
    pub received: i64,
    pub in_process: i64,
    pub resolved: i64,
    pub cancelled: i64,
    /// Reports still in the initial state past the overdue window.
    pub overdue: i64,
    /// Reports created during the server-local calendar day.
    pub today: i64,
    /// Trailing twelve months of creations, zero-filled, chronological.
    pub monthly: Vec<MonthBucket>,
    /// Count per category name, descending.
    pub by_category: Vec<CategoryCount>,
}

/// One slice of the per-category distribution.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Single-row aggregate produced by the counts query.
#[derive(Debug, FromRow)]
pub(crate) struct StateCountsRow {
    pub total: i64,
    pub received: i64,
    pub in_process: i64,
    pub resolved: i64,
    pub cancelled: i64,
    pub overdue: i64,
    pub today: i64,
}

/// One sparse row of the monthly group-by, before zero-filling.
#[derive(Debug, FromRow)]
pub(crate) struct MonthCountRow {
    pub year: i64,
    pub month: i64,
    pub count: i64,
}
