//! Audit trail for fintrack
//!
//! Every ledger mutation is written as one JSON line to `audit.log`. The
//! trail is append-only and is never consulted when rebuilding state; it
//! exists so a user can see what changed a balance and when.
//!
//! - `AuditEntry`: timestamp, operation, entity and optional before/after
//!   snapshots.
//! - `AuditLogger`: JSONL writer and reader.
//! - `generate_diff`: one-line summary of top-level field changes.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
