//! State-transition history entity models.
//!
//! History rows are append-only and immutable; they outlive a soft-deleted
//! report so the audit trail stays complete.

use faultdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `report_state_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StateChange {
    pub id: DbId,
    pub report_id: DbId,
    /// Absent only when the entry predates any recorded state.
    pub previous_state_id: Option<DbId>,
    pub new_state_id: DbId,
    pub actor_id: DbId,
    pub comment: Option<String>,
    pub changed_at: Timestamp,
}

/// DTO for appending a history entry inside a transition transaction.
#[derive(Debug, Deserialize)]
pub struct CreateStateChange {
    pub report_id: DbId,
    pub previous_state_id: Option<DbId>,
    pub new_state_id: DbId,
    pub actor_id: DbId,
    pub comment: Option<String>,
    pub changed_at: Timestamp,
}

/// A history row joined with state and actor names for the history view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StateChangeDetail {
    pub id: DbId,
    pub report_id: DbId,
    pub previous_state_id: Option<DbId>,
    pub previous_state_name: Option<String>,
    pub new_state_id: DbId,
    pub new_state_name: String,
    pub actor_id: DbId,
    pub actor_name: String,
    pub comment: Option<String>,
    pub changed_at: Timestamp,
}
