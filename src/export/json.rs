//! JSON export of the whole ledger, with schema versioning

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Transaction, MAX_AMOUNT};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure, shared by the JSON and YAML formats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Version of the application that wrote the export
    pub app_version: String,

    /// Oldest first
    pub transactions: Vec<Transaction>,

    pub metadata: ExportMetadata,
}

/// Summary figures, for reference only; imports ignore them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub total_income: Money,
    pub total_expense: Money,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl LedgerExport {
    pub fn from_storage(storage: &Storage) -> TrackerResult<Self> {
        let mut transactions = storage.transactions().list_all()?;
        transactions.reverse();

        let total_of = |income: bool| -> TrackerResult<Money> {
            Money::checked_sum(
                transactions
                    .iter()
                    .filter(|t| t.is_income() == income)
                    .map(|t| t.amount),
            )
            .ok_or_else(TrackerError::total_overflow)
        };

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            total_income: total_of(true)?,
            total_expense: total_of(false)?,
            earliest_transaction: transactions.first().map(|t| t.date.to_string()),
            latest_transaction: transactions.last().map(|t| t.date.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            metadata,
        })
    }

    /// Check the schema version and every row before an import
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        for txn in &self.transactions {
            if !txn.amount.is_positive() {
                return Err(format!(
                    "Transaction {} has a non-positive amount {}",
                    txn.id, txn.amount
                ));
            }
            if txn.amount > MAX_AMOUNT {
                return Err(format!(
                    "Transaction {} amount {} exceeds the maximum of {}",
                    txn.id, txn.amount, MAX_AMOUNT
                ));
            }
            if txn.kind.canonical_category(&txn.category).is_none() {
                return Err(format!(
                    "Transaction {} has unknown {} category '{}'",
                    txn.id,
                    txn.kind.as_str().to_lowercase(),
                    txn.category
                ));
            }
        }

        Ok(())
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> TrackerResult<()> {
    let export = LedgerExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn parse_json(json_str: &str) -> TrackerResult<LedgerExport> {
    let export: LedgerExport = serde_json::from_str(json_str)?;
    export.validate().map_err(TrackerError::Validation)?;
    Ok(export)
}
