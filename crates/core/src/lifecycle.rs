//! Transition policy and derived-timestamp rules for the report lifecycle.
//!
//! States are data-driven: the catalog row supplies `sort_order` and
//! `is_terminal`, and this module decides what a transition is allowed to do
//! and which timestamps it stamps. The lifecycle engine in `faultdesk-db`
//! applies these decisions inside its transaction.

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// The slice of a catalog state row that lifecycle decisions need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    pub id: DbId,
    pub sort_order: i64,
    pub is_terminal: bool,
}

// ---------------------------------------------------------------------------
// Transition policy
// ---------------------------------------------------------------------------

/// Pluggable transition validator.
///
/// `Unrestricted` permits any state-to-state move aside from referential
/// validity, which is the behaviour the audit trail was designed around: the
/// trail records history, it is not a guard. `ForwardOnly` is the stricter
/// opt-in policy: transitions may only keep or increase `sort_order`, and a
/// terminal state cannot be left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    #[default]
    Unrestricted,
    ForwardOnly,
}

impl TransitionPolicy {
    /// Validate a transition from `from` to `to` under this policy.
    pub fn check(self, from: &StateInfo, to: &StateInfo) -> Result<(), CoreError> {
        match self {
            TransitionPolicy::Unrestricted => Ok(()),
            TransitionPolicy::ForwardOnly => {
                if from.id == to.id {
                    return Ok(());
                }
                if from.is_terminal {
                    return Err(CoreError::Validation(
                        "Cannot transition out of a terminal state".into(),
                    ));
                }
                if to.sort_order < from.sort_order {
                    return Err(CoreError::Validation(
                        "Transition would move the report backwards in the workflow".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Derived timestamps
// ---------------------------------------------------------------------------

/// How `finalized_at` behaves when a report sits in a terminal state.
///
/// `SetOnce` stamps the first entry into a terminal state and never touches
/// it again. `EachSave` re-stamps on every save while terminal, which is
/// what the legacy system did; it is kept selectable for parity but is not
/// the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FinalizeStamping {
    #[default]
    SetOnce,
    EachSave,
}

/// Compute the `assigned_at` value after a transition.
///
/// Stamped exactly once: on the first transition into the designated
/// in-progress state. Later transitions never overwrite it.
pub fn stamp_assigned(
    current: Option<Timestamp>,
    new_state_id: DbId,
    in_progress_state_id: DbId,
    now: Timestamp,
) -> Option<Timestamp> {
    match current {
        Some(existing) => Some(existing),
        None if new_state_id == in_progress_state_id => Some(now),
        None => None,
    }
}

/// Compute the `finalized_at` value after a transition.
pub fn stamp_finalized(
    current: Option<Timestamp>,
    new_state: &StateInfo,
    mode: FinalizeStamping,
    now: Timestamp,
) -> Option<Timestamp> {
    if !new_state.is_terminal {
        return current;
    }
    match mode {
        FinalizeStamping::SetOnce => current.or(Some(now)),
        FinalizeStamping::EachSave => Some(now),
    }
}
