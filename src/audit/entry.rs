//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionId};

/// Ledger changes that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log line
///
/// Carries the full transaction as it was at the time of the operation, so
/// a deleted row can be reconstructed from the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub transaction_id: TransactionId,

    pub transaction: Transaction,
}

impl AuditEntry {
    pub fn created(transaction: &Transaction) -> Self {
        Self::new(Operation::Create, transaction)
    }

    pub fn deleted(transaction: &Transaction) -> Self {
        Self::new(Operation::Delete, transaction)
    }

    fn new(operation: Operation, transaction: &Transaction) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            transaction_id: transaction.id,
            transaction: transaction.clone(),
        }
    }

    /// One-line summary for terminal output
    pub fn format_human_readable(&self) -> String {
        let txn = &self.transaction;
        let mut output = format!(
            "[{}] {} #{} {} {} {} on {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.transaction_id,
            txn.kind,
            txn.category,
            txn.amount,
            txn.date
        );

        if !txn.description.is_empty() {
            output.push_str(&format!(" ({})", txn.description));
        }

        output
    }
}
