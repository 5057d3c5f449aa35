//! Transactional lifecycle engine for reports.
//!
//! The engine owns every write to a report's workflow fields and every audit
//! append. Each operation validates its references up front, then performs
//! all mutations inside a single transaction, so callers can never observe a
//! report whose state changed without a matching history entry (or the other
//! way around).

use chrono::Utc;
use faultdesk_core::comment as comment_rules;
use faultdesk_core::error::CoreError;
use faultdesk_core::folio;
use faultdesk_core::lifecycle::{self, FinalizeStamping, TransitionPolicy};
use faultdesk_core::report::{
    self as report_rules, MAX_LOCATION_DETAIL_LENGTH, MAX_SUBCATEGORY_LENGTH, MAX_TITLE_LENGTH,
};
use faultdesk_core::types::DbId;

use crate::models::history::CreateStateChange;
use crate::models::report::{CreateReport, Report, TransitionReport, WorkflowUpdate};
use crate::models::status::{PrioritySeed, StateSeed};
use crate::repositories::{CatalogRepo, CommentRepo, HistoryRepo, ReportRepo, UserRepo};
use crate::DbPool;

/// Error type for lifecycle operations: a domain failure or a storage
/// failure. The API layer maps both onto HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// The lifecycle engine. Cheap to construct; holds only policy knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleEngine {
    policy: TransitionPolicy,
    stamping: FinalizeStamping,
}

impl LifecycleEngine {
    /// Engine with explicit transition policy and finalize-stamping mode.
    pub fn new(policy: TransitionPolicy, stamping: FinalizeStamping) -> Self {
        Self { policy, stamping }
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    /// File a new report in the catalog's initial state.
    ///
    /// Validates every reference against the active catalog, defaults the
    /// priority to Medium, and retries folio generation on a unique-index
    /// collision. No history entry is written here; the first transition
    /// records the initial state as its `previous_state`.
    pub async fn create_report(
        &self,
        pool: &DbPool,
        reporter_id: DbId,
        input: &CreateReport,
    ) -> Result<Report, EngineError> {
        report_rules::validate_description(&input.description)?;
        report_rules::validate_optional_text(input.title.as_deref(), "Title", MAX_TITLE_LENGTH)?;
        report_rules::validate_optional_text(
            input.subcategory.as_deref(),
            "Subcategory",
            MAX_SUBCATEGORY_LENGTH,
        )?;
        report_rules::validate_optional_text(
            input.location_detail.as_deref(),
            "Location detail",
            MAX_LOCATION_DETAIL_LENGTH,
        )?;

        CatalogRepo::find_active_category(pool, input.category_id)
            .await?
            .ok_or_else(|| CoreError::Validation("Category not found".into()))?;

        if let Some(building_id) = input.building_id {
            CatalogRepo::find_active_building(pool, building_id)
                .await?
                .ok_or_else(|| CoreError::Validation("Building not found".into()))?;
        }

        if let Some(room_id) = input.room_id {
            let room = CatalogRepo::find_active_room(pool, room_id)
                .await?
                .ok_or_else(|| CoreError::Validation("Room not found".into()))?;
            if let Some(building_id) = input.building_id {
                if room.building_id != building_id {
                    return Err(CoreError::Validation(
                        "Room does not belong to the selected building".into(),
                    )
                    .into());
                }
            }
        }

        UserRepo::find_active_by_id(pool, reporter_id)
            .await?
            .ok_or_else(|| CoreError::Validation("Reporter not found".into()))?;

        let priority_id = input.priority_id.unwrap_or(PrioritySeed::Medium.id());
        CatalogRepo::find_active_priority(pool, priority_id)
            .await?
            .ok_or_else(|| CoreError::Validation("Priority not found".into()))?;

        let initial_state = CatalogRepo::initial_state(pool)
            .await?
            .ok_or_else(|| CoreError::Internal("No active states configured".into()))?;

        let now = Utc::now();
        for attempt in 1..=folio::FOLIO_MAX_ATTEMPTS {
            let folio = folio::generate(now.date_naive());
            match ReportRepo::insert(
                pool,
                &folio,
                reporter_id,
                initial_state.id,
                priority_id,
                now,
                input,
            )
            .await
            {
                Ok(report) => {
                    tracing::info!(
                        report_id = report.id,
                        folio = %report.folio,
                        reporter_id,
                        "Report created",
                    );
                    return Ok(report);
                }
                Err(err) if is_unique_violation(&err) => {
                    tracing::warn!(attempt, folio = %folio, "Folio collision, regenerating");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(CoreError::Internal("Folio generation exhausted its retries".into()).into())
    }

    // -----------------------------------------------------------------------
    // Transition
    // -----------------------------------------------------------------------

    /// Apply a state/priority/assignment transition to a report.
    ///
    /// The report row update, the optional action-note comment, and the
    /// history append commit as one transaction.
    pub async fn transition(
        &self,
        pool: &DbPool,
        report_id: DbId,
        actor_id: DbId,
        input: &TransitionReport,
    ) -> Result<Report, EngineError> {
        let action_note = input
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());
        if let Some(text) = action_note {
            comment_rules::validate_body(text)?;
        }

        let mut tx = pool.begin().await?;

        // A missing or soft-deleted report reads as not-found before any
        // reference validation happens.
        let report = ReportRepo::find_for_update(&mut tx, report_id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Report" })?;

        if let Some(expected) = input.expected_version {
            if expected != report.row_version {
                return Err(CoreError::Conflict(
                    "Report was modified by another request".into(),
                )
                .into());
            }
        }

        // Catalog and user reads go through the pool; the transaction has
        // not written yet, so these never contend with it.
        let new_state = CatalogRepo::find_active_state(pool, input.state_id)
            .await?
            .ok_or_else(|| CoreError::Validation("State not found".into()))?;
        let new_priority = CatalogRepo::find_active_priority(pool, input.priority_id)
            .await?
            .ok_or_else(|| CoreError::Validation("Priority not found".into()))?;
        if let Some(assignee_id) = input.assignee_id {
            UserRepo::find_active_by_id(pool, assignee_id)
                .await?
                .ok_or_else(|| CoreError::Validation("Assignee not found".into()))?;
        }
        UserRepo::find_active_by_id(pool, actor_id)
            .await?
            .ok_or_else(|| CoreError::Validation("Actor not found".into()))?;

        // The current state may have been deactivated since the report
        // entered it; resolve it without the active filter.
        let old_state = CatalogRepo::find_state(pool, report.state_id)
            .await?
            .ok_or_else(|| CoreError::Internal("Report references an unknown state".into()))?;

        self.policy
            .check(&old_state.lifecycle_info(), &new_state.lifecycle_info())?;

        let now = Utc::now();
        let update = WorkflowUpdate {
            state_id: new_state.id,
            priority_id: new_priority.id,
            assignee_id: input.assignee_id,
            updated_by: actor_id,
            updated_at: now,
            assigned_at: lifecycle::stamp_assigned(
                report.assigned_at,
                new_state.id,
                StateSeed::InProcess.id(),
                now,
            ),
            finalized_at: lifecycle::stamp_finalized(
                report.finalized_at,
                &new_state.lifecycle_info(),
                self.stamping,
                now,
            ),
            expected_version: report.row_version,
        };

        let updated = ReportRepo::apply_workflow_update(&mut tx, report_id, &update)
            .await?
            .ok_or_else(|| {
                CoreError::Conflict("Report was modified by another request".into())
            })?;

        if let Some(text) = action_note {
            CommentRepo::create_action_note(&mut tx, report_id, actor_id, text, now).await?;
        }

        HistoryRepo::append(
            &mut tx,
            &CreateStateChange {
                report_id,
                previous_state_id: Some(report.state_id),
                new_state_id: new_state.id,
                actor_id,
                comment: action_note.map(str::to_owned),
                changed_at: now,
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            report_id,
            from_state = report.state_id,
            to_state = new_state.id,
            actor_id,
            "Report transitioned",
        );

        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Soft delete
    // -----------------------------------------------------------------------

    /// Soft-delete a report. State, priority, and history are untouched;
    /// the row simply vanishes from listings, statistics, and transitions.
    pub async fn soft_delete(&self, pool: &DbPool, report_id: DbId) -> Result<(), EngineError> {
        let deleted = ReportRepo::soft_delete(pool, report_id, Utc::now()).await?;
        if !deleted {
            return Err(CoreError::NotFound { entity: "Report" }.into());
        }
        tracing::info!(report_id, "Report soft-deleted");
        Ok(())
    }
}

/// True when the error is a storage-level unique-constraint violation
/// (folio collisions during creation).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
