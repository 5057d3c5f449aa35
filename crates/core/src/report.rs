//! Report field limits, well-known state names, and validation helpers.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Well-known catalog names
// ---------------------------------------------------------------------------
//
// The statistics aggregator counts per state by exact name match, mirroring
// the legacy dashboards. This is brittle against catalog renames (a renamed
// state silently drops out of its counter); lifecycle decisions therefore go
// through seeded IDs instead, and only the counters use these names.

/// Initial state for a newly filed report.
pub const STATE_RECEIVED: &str = "Received";
/// A technician is working on the report.
pub const STATE_IN_PROCESS: &str = "In Process";
/// Terminal: the underlying issue was fixed.
pub const STATE_RESOLVED: &str = "Resolved";
/// Terminal: closed without work being done.
pub const STATE_CANCELLED: &str = "Cancelled";

// ---------------------------------------------------------------------------
// Field limits
// ---------------------------------------------------------------------------

/// Maximum length for the free-text problem description (characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 4_000;

/// Maximum length for the optional short title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for the optional subcategory label.
pub const MAX_SUBCATEGORY_LENGTH: usize = 100;

/// Maximum length for the optional free-text location detail.
pub const MAX_LOCATION_DETAIL_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the report description: required, non-blank, bounded.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation("Description is required".into()));
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional bounded text field.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), CoreError> {
    if let Some(text) = value {
        if text.chars().count() > max_len {
            return Err(CoreError::Validation(format!(
                "{field} exceeds maximum length of {max_len} characters"
            )));
        }
    }
    Ok(())
}
