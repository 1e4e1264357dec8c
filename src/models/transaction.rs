//! Transaction model
//!
//! A single ledger row: an income or expense amount on a date, filed under
//! one category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::TransactionKind;
use super::money::Money;

/// Ledger row id (SQLite rowid)
pub type TransactionId = i64;

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    pub kind: TransactionKind,

    /// Canonical category name for `kind`
    pub category: String,

    /// Always positive; the kind carries the direction
    pub amount: Money,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// A transaction that has not been written yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: String,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            category: category.into(),
            amount,
            date,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
