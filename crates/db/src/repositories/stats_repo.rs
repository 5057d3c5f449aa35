//! Read-only statistics aggregation over the active report set.
//!
//! Everything here tolerates an empty report set (zeroed results, never an
//! error) and is idempotent: two calls with no intervening writes return
//! identical views.

use chrono::{Duration, TimeZone, Utc};
use faultdesk_core::report::{STATE_CANCELLED, STATE_IN_PROCESS, STATE_RECEIVED, STATE_RESOLVED};
use faultdesk_core::stats::{local_day_bounds, trend_window_start, zero_fill_months};
use faultdesk_core::types::Timestamp;

use crate::models::stats::{
    CategoryCount, DashboardStats, MonthCountRow, StateCountsRow, StatsFilter,
};
use crate::DbPool;

/// Provides the dashboard aggregation view.
pub struct StatsRepo;

impl StatsRepo {
    /// Compute the full dashboard view.
    ///
    /// `overdue_after_days` is the configurable window after which a report
    /// still sitting in the initial state counts as overdue.
    pub async fn dashboard(
        pool: &DbPool,
        filter: &StatsFilter,
        overdue_after_days: i64,
        now: Timestamp,
    ) -> Result<DashboardStats, sqlx::Error> {
        let counts = Self::state_counts(pool, filter, overdue_after_days, now).await?;
        let monthly_sparse = Self::monthly_counts(pool, filter, now).await?;
        let by_category = Self::category_distribution(pool, filter).await?;

        let sparse: Vec<(i32, u32, i64)> = monthly_sparse
            .iter()
            .map(|row| (row.year as i32, row.month as u32, row.count))
            .collect();

        Ok(DashboardStats {
            total: counts.total,
            received: counts.received,
            in_process: counts.in_process,
            resolved: counts.resolved,
            cancelled: counts.cancelled,
            overdue: counts.overdue,
            today: counts.today,
            monthly: zero_fill_months(now.date_naive(), &sparse),
            by_category,
        })
    }

    /// Single-row aggregate: total, per-state counters, overdue, today.
    ///
    /// Per-state counters match on the seeded state *names*, mirroring the
    /// legacy dashboards. Brittle against catalog renames; the overdue
    /// counter avoids that by resolving the initial state through its
    /// sort order instead.
    async fn state_counts(
        pool: &DbPool,
        filter: &StatsFilter,
        overdue_after_days: i64,
        now: Timestamp,
    ) -> Result<StateCountsRow, sqlx::Error> {
        let overdue_cutoff = now - Duration::days(overdue_after_days);
        let (today_start, today_end) = local_day_bounds(now);

        let (filter_clause, binds) = build_filter(filter, 8);
        let query = format!(
            "SELECT COUNT(*) AS total, \
                COALESCE(SUM(CASE WHEN s.name = $1 THEN 1 ELSE 0 END), 0) AS received, \
                COALESCE(SUM(CASE WHEN s.name = $2 THEN 1 ELSE 0 END), 0) AS in_process, \
                COALESCE(SUM(CASE WHEN s.name = $3 THEN 1 ELSE 0 END), 0) AS resolved, \
                COALESCE(SUM(CASE WHEN s.name = $4 THEN 1 ELSE 0 END), 0) AS cancelled, \
                COALESCE(SUM(CASE WHEN r.state_id = \
                    (SELECT id FROM states WHERE is_active = 1 ORDER BY sort_order LIMIT 1) \
                    AND r.created_at < $5 THEN 1 ELSE 0 END), 0) AS overdue, \
                COALESCE(SUM(CASE WHEN r.created_at >= $6 AND r.created_at < $7 \
                    THEN 1 ELSE 0 END), 0) AS today \
             FROM reports r \
             JOIN states s ON s.id = r.state_id \
             JOIN categories c ON c.id = r.category_id \
             WHERE r.is_deleted = 0{filter_clause}"
        );

        let mut q = sqlx::query_as::<_, StateCountsRow>(&query)
            .bind(STATE_RECEIVED)
            .bind(STATE_IN_PROCESS)
            .bind(STATE_RESOLVED)
            .bind(STATE_CANCELLED)
            .bind(overdue_cutoff)
            .bind(today_start)
            .bind(today_end);
        q = bind_filter(q, &binds);
        q.fetch_one(pool).await
    }

    /// Sparse per-month creation counts over the trailing trend window.
    async fn monthly_counts(
        pool: &DbPool,
        filter: &StatsFilter,
        now: Timestamp,
    ) -> Result<Vec<MonthCountRow>, sqlx::Error> {
        let window_start = Utc.from_utc_datetime(
            &trend_window_start(now.date_naive())
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always valid"),
        );

        let (filter_clause, binds) = build_filter(filter, 2);
        let query = format!(
            "SELECT CAST(strftime('%Y', r.created_at) AS INTEGER) AS year, \
                CAST(strftime('%m', r.created_at) AS INTEGER) AS month, \
                COUNT(*) AS count \
             FROM reports r \
             JOIN categories c ON c.id = r.category_id \
             WHERE r.is_deleted = 0 AND r.created_at >= $1{filter_clause} \
             GROUP BY year, month \
             ORDER BY year, month"
        );

        let mut q = sqlx::query_as::<_, MonthCountRow>(&query).bind(window_start);
        q = bind_filter(q, &binds);
        q.fetch_all(pool).await
    }

    /// Per-category counts over the whole active set, descending.
    async fn category_distribution(
        pool: &DbPool,
        filter: &StatsFilter,
    ) -> Result<Vec<CategoryCount>, sqlx::Error> {
        let (filter_clause, binds) = build_filter(filter, 1);
        let query = format!(
            "SELECT c.name AS category, COUNT(*) AS count \
             FROM reports r \
             JOIN categories c ON c.id = r.category_id \
             WHERE r.is_deleted = 0{filter_clause} \
             GROUP BY c.name \
             ORDER BY count DESC, c.name ASC"
        );

        let mut q = sqlx::query_as::<_, CategoryCount>(&query);
        q = bind_filter(q, &binds);
        q.fetch_all(pool).await
    }
}

/// Typed bind value for the shared filter clause.
enum FilterBind {
    BigInt(i64),
    Text(String),
}

/// Build the optional reporter / dashboard-type filter clause.
///
/// Returns a string of `AND`-ed conditions (empty when no filter is active)
/// with placeholders starting at `start_idx`, plus the values to bind.
fn build_filter(filter: &StatsFilter, start_idx: u32) -> (String, Vec<FilterBind>) {
    let mut clause = String::new();
    let mut binds = Vec::new();
    let mut idx = start_idx;

    if let Some(reporter_id) = filter.reporter_id {
        clause.push_str(&format!(" AND r.reporter_id = ${idx}"));
        idx += 1;
        binds.push(FilterBind::BigInt(reporter_id));
    }

    if let Some(ref dashboard_type) = filter.dashboard_type {
        clause.push_str(&format!(" AND c.dashboard_type = ${idx}"));
        binds.push(FilterBind::Text(dashboard_type.clone()));
    }

    (clause, binds)
}

/// Bind the filter values onto a query in clause order.
fn bind_filter<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Sqlite, O, sqlx::sqlite::SqliteArguments<'q>>,
    binds: &'q [FilterBind],
) -> sqlx::query::QueryAs<'q, sqlx::Sqlite, O, sqlx::sqlite::SqliteArguments<'q>> {
    for value in binds {
        match value {
            FilterBind::BigInt(v) => q = q.bind(*v),
            FilterBind::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}
