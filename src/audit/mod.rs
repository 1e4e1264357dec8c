//! Audit logging for ledger changes
//!
//! Every transaction that is added or deleted is appended to `audit.log` as a
//! JSON line holding the full row, so the ledger's history can be inspected
//! (and a mistaken delete re-entered) after the fact.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
