//! Read-only repository for the workflow and location catalogs.
//!
//! Catalog rows are seeded by migration and only ever deactivated, so this
//! repository exposes lookups and listings but no writes.

use faultdesk_core::types::DbId;

use crate::models::catalog::{Building, Category, Priority, Room, State};
use crate::DbPool;

/// Column list for `states` queries.
const STATE_COLUMNS: &str =
    "id, name, sort_order, is_terminal, color, description, is_active, created_at";

/// Column list for `priorities` queries.
const PRIORITY_COLUMNS: &str = "id, name, level, color, description, is_active, created_at";

/// Column list for `categories` queries.
const CATEGORY_COLUMNS: &str =
    "id, name, dashboard_type, description, icon, color, is_active, created_at";

/// Column list for `buildings` queries.
const BUILDING_COLUMNS: &str = "id, name, code, is_active, created_at";

/// Column list for `rooms` queries.
const ROOM_COLUMNS: &str = "id, building_id, name, is_active, created_at";

/// Provides lookups and listings for catalog reference data.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Find a state by ID regardless of its active flag.
    ///
    /// Reports may still reference a deactivated state; lifecycle decisions
    /// about the *current* state must not fail just because the catalog row
    /// was retired.
    pub async fn find_state(pool: &DbPool, id: DbId) -> Result<Option<State>, sqlx::Error> {
        let query = format!("SELECT {STATE_COLUMNS} FROM states WHERE id = $1");
        sqlx::query_as::<_, State>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active state by ID (transition targets must be active).
    pub async fn find_active_state(pool: &DbPool, id: DbId) -> Result<Option<State>, sqlx::Error> {
        let query = format!("SELECT {STATE_COLUMNS} FROM states WHERE id = $1 AND is_active = 1");
        sqlx::query_as::<_, State>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The designated initial state: the active state with the lowest order.
    pub async fn initial_state(pool: &DbPool) -> Result<Option<State>, sqlx::Error> {
        let query = format!(
            "SELECT {STATE_COLUMNS} FROM states WHERE is_active = 1 \
             ORDER BY sort_order LIMIT 1"
        );
        sqlx::query_as::<_, State>(&query).fetch_optional(pool).await
    }

    /// Find an active priority by ID.
    pub async fn find_active_priority(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<Priority>, sqlx::Error> {
        let query =
            format!("SELECT {PRIORITY_COLUMNS} FROM priorities WHERE id = $1 AND is_active = 1");
        sqlx::query_as::<_, Priority>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active category by ID.
    pub async fn find_active_category(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query =
            format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1 AND is_active = 1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active building by ID.
    pub async fn find_active_building(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<Building>, sqlx::Error> {
        let query =
            format!("SELECT {BUILDING_COLUMNS} FROM buildings WHERE id = $1 AND is_active = 1");
        sqlx::query_as::<_, Building>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active room by ID.
    pub async fn find_active_room(pool: &DbPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1 AND is_active = 1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active states in workflow order.
    pub async fn list_states(pool: &DbPool) -> Result<Vec<State>, sqlx::Error> {
        let query = format!(
            "SELECT {STATE_COLUMNS} FROM states WHERE is_active = 1 ORDER BY sort_order"
        );
        sqlx::query_as::<_, State>(&query).fetch_all(pool).await
    }

    /// List active priorities by ascending level.
    pub async fn list_priorities(pool: &DbPool) -> Result<Vec<Priority>, sqlx::Error> {
        let query =
            format!("SELECT {PRIORITY_COLUMNS} FROM priorities WHERE is_active = 1 ORDER BY level");
        sqlx::query_as::<_, Priority>(&query).fetch_all(pool).await
    }

    /// List active categories alphabetically.
    pub async fn list_categories(pool: &DbPool) -> Result<Vec<Category>, sqlx::Error> {
        let query =
            format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE is_active = 1 ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// List active buildings alphabetically.
    pub async fn list_buildings(pool: &DbPool) -> Result<Vec<Building>, sqlx::Error> {
        let query =
            format!("SELECT {BUILDING_COLUMNS} FROM buildings WHERE is_active = 1 ORDER BY name");
        sqlx::query_as::<_, Building>(&query).fetch_all(pool).await
    }

    /// List active rooms, optionally narrowed to one building.
    pub async fn list_rooms(
        pool: &DbPool,
        building_id: Option<DbId>,
    ) -> Result<Vec<Room>, sqlx::Error> {
        match building_id {
            Some(building_id) => {
                let query = format!(
                    "SELECT {ROOM_COLUMNS} FROM rooms \
                     WHERE is_active = 1 AND building_id = $1 ORDER BY name"
                );
                sqlx::query_as::<_, Room>(&query)
                    .bind(building_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {ROOM_COLUMNS} FROM rooms WHERE is_active = 1 \
                     ORDER BY building_id, name"
                );
                sqlx::query_as::<_, Room>(&query).fetch_all(pool).await
            }
        }
    }
}
