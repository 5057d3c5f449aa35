//! Catalog entity models: states, priorities, categories, and locations.
//!
//! Catalog rows are reference data: seeded by migration, deactivated rather
//! than deleted once a report points at them. The lifecycle engine reads
//! them; nothing in this workspace writes them.

use faultdesk_core::lifecycle::StateInfo;
use faultdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `states` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct State {
    pub id: DbId,
    pub name: String,
    pub sort_order: i64,
    pub is_terminal: bool,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl State {
    /// The slice of this row that lifecycle decisions consume.
    pub fn lifecycle_info(&self) -> StateInfo {
        StateInfo {
            id: self.id,
            sort_order: self.sort_order,
            is_terminal: self.is_terminal,
        }
    }
}

/// A row from the `priorities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Priority {
    pub id: DbId,
    pub name: String,
    pub level: i64,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub dashboard_type: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// A row from the `buildings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Building {
    pub id: DbId,
    pub name: String,
    pub code: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub building_id: DbId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}
