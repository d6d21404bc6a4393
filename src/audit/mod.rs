//! Audit logging
//!
//! Every create, update and delete made through the services is appended to
//! `audit.log` with the entity's state before and after the change.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
