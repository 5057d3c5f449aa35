//! Well-known role name constants.
//!
//! These must match the `users.role` values written by the identity
//! collaborator (and the bootstrap admin in `0002_seed_catalog.sql`).

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TECHNICIAN: &str = "technician";
pub const ROLE_REPORTER: &str = "reporter";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_TECHNICIAN, ROLE_REPORTER];

/// Staff roles may triage any report; reporters only see their own.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_TECHNICIAN
}
