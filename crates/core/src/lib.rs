//! Domain logic for the faultdesk report tracker.
//!
//! This crate has no I/O: it holds the shared ID/timestamp types, the error
//! taxonomy, folio generation, the lifecycle transition rules, statistics
//! bucketing, and field validation. The persistence layer (`faultdesk-db`)
//! and the HTTP surface (`faultdesk-api`) both build on it.

pub mod comment;
pub mod error;
pub mod folio;
pub mod lifecycle;
pub mod pagination;
pub mod report;
pub mod roles;
pub mod stats;
pub mod types;
