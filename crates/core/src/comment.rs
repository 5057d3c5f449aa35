//! Comment visibility constants and validation.

use crate::error::CoreError;

/// Visible to the reporter and staff alike.
pub const VISIBILITY_PUBLIC: &str = "public";
/// Staff-only working notes.
pub const VISIBILITY_INTERNAL: &str = "internal";

/// All valid comment visibilities.
pub const VALID_VISIBILITIES: &[&str] = &[VISIBILITY_PUBLIC, VISIBILITY_INTERNAL];

/// Maximum length for a comment body (characters).
pub const MAX_BODY_LENGTH: usize = 2_000;

/// Validate that a visibility string is one of the known values.
pub fn validate_visibility(visibility: &str) -> Result<(), CoreError> {
    if VALID_VISIBILITIES.contains(&visibility) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid comment visibility '{visibility}'. Must be one of: {VALID_VISIBILITIES:?}"
        )))
    }
}

/// Validate the comment body: required, non-blank, bounded.
pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation("Comment body is required".into()));
    }
    if body.chars().count() > MAX_BODY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment body exceeds maximum length of {MAX_BODY_LENGTH} characters"
        )));
    }
    Ok(())
}
