#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Lookup by ID or folio failed, or the target is soft-deleted.
    ///
    /// Deliberately carries no key: callers must not be able to tell a
    /// deleted row from one that never existed.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
