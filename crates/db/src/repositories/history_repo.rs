//! Repository for the `report_state_history` table.
//!
//! The audit trail is append-only: this repository exposes exactly one
//! write, scoped to the lifecycle engine's transaction, and no update or
//! delete. Entries persist for the lifetime of the report, including after
//! the report itself is soft-deleted.

use faultdesk_core::types::DbId;
use sqlx::{Sqlite, Transaction};

use crate::models::history::{CreateStateChange, StateChange, StateChangeDetail};
use crate::DbPool;

/// Column list for raw `report_state_history` queries.
const COLUMNS: &str = "\
    id, report_id, previous_state_id, new_state_id, actor_id, comment, changed_at";

/// Provides append and listing operations for the audit trail.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Append one history entry inside a transition transaction.
    pub async fn append(
        tx: &mut Transaction<'_, Sqlite>,
        entry: &CreateStateChange,
    ) -> Result<StateChange, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_state_history \
                (report_id, previous_state_id, new_state_id, actor_id, comment, changed_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StateChange>(&query)
            .bind(entry.report_id)
            .bind(entry.previous_state_id)
            .bind(entry.new_state_id)
            .bind(entry.actor_id)
            .bind(&entry.comment)
            .bind(entry.changed_at)
            .fetch_one(&mut **tx)
            .await
    }

    /// List a report's history in insertion order, with state and actor
    /// names joined for the history view.
    ///
    /// Deliberately does not join through `reports`, so the trail stays
    /// readable after the report is soft-deleted.
    pub async fn list_by_report(
        pool: &DbPool,
        report_id: DbId,
    ) -> Result<Vec<StateChangeDetail>, sqlx::Error> {
        let query = "\
            SELECT h.id, h.report_id, \
                h.previous_state_id, ps.name AS previous_state_name, \
                h.new_state_id, ns.name AS new_state_name, \
                h.actor_id, u.name AS actor_name, \
                h.comment, h.changed_at \
            FROM report_state_history h \
            JOIN states ns ON ns.id = h.new_state_id \
            JOIN users u ON u.id = h.actor_id \
            LEFT JOIN states ps ON ps.id = h.previous_state_id \
            WHERE h.report_id = $1 \
            ORDER BY h.changed_at ASC, h.id ASC";
        sqlx::query_as::<_, StateChangeDetail>(query)
            .bind(report_id)
            .fetch_all(pool)
            .await
    }
}
