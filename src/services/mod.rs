//! Service layer for the money tracker
//!
//! Business rules on top of the storage layer: input validation, category
//! resolution and audit logging.

pub mod transaction;

pub use transaction::{AddTransactionInput, TransactionFilter, TransactionService};
