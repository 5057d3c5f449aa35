//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Query-parameter structs for list endpoints where applicable

pub mod catalog;
pub mod comment;
pub mod history;
pub mod report;
pub mod stats;
pub mod status;
pub mod user;
