//! Ledger export and restore
//!
//! - CSV: transactions only, spreadsheet-compatible
//! - JSON: machine-readable full export with metadata
//! - YAML: human-readable full export
//!
//! JSON and YAML exports can be read back with [`restore`].

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_transactions_csv;
pub use json::{export_full_json, parse_json, ExportMetadata, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, parse_yaml};

use log::info;

use crate::error::{TrackerError, TrackerResult};
use crate::services::{AddTransactionInput, TransactionService};
use crate::storage::Storage;

/// Re-add every transaction of an export, returning how many were added.
///
/// The export is validated first and the rows are written in one SQLite
/// transaction, so a failure leaves the ledger untouched. Rows get fresh
/// ids; the ids in the export are not preserved.
pub fn restore(storage: &Storage, export: &LedgerExport) -> TrackerResult<usize> {
    export.validate().map_err(TrackerError::Validation)?;

    let inputs = export
        .transactions
        .iter()
        .map(|txn| AddTransactionInput {
            kind: txn.kind,
            amount: txn.amount,
            category: txn.category.clone(),
            date: txn.date,
            description: Some(txn.description.clone()),
        })
        .collect();

    let added = TransactionService::new(storage).add_all(inputs)?;

    info!("Restored {} transactions", added.len());
    Ok(added.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn two_row_export() -> LedgerExport {
        let source = Storage::in_memory().unwrap();
        let repo = source.transactions();
        repo.insert(&NewTransaction::new(
            TransactionKind::Income,
            "Salary",
            Money::from_cents(200000),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        ))
        .unwrap();
        repo.insert(&NewTransaction::new(
            TransactionKind::Expense,
            "Food",
            Money::from_cents(1800),
            NaiveDate::from_ymd_opt(2025, 7, 2).unwrap(),
        ))
        .unwrap();
        LedgerExport::from_storage(&source).unwrap()
    }

    #[test]
    fn test_restore_into_empty_ledger() {
        let source = Storage::in_memory().unwrap();
        source
            .transactions()
            .insert(&NewTransaction::new(
                TransactionKind::Expense,
                "Utilities",
                Money::from_cents(6400),
                NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
            ))
            .unwrap();

        let mut output = Vec::new();
        export_full_json(&source, &mut output, false).unwrap();
        let export = parse_json(&String::from_utf8(output).unwrap()).unwrap();

        let target = Storage::in_memory().unwrap();
        assert_eq!(restore(&target, &export).unwrap(), 1);

        let restored = target.transactions().list_all().unwrap();
        assert_eq!(restored[0].category, "Utilities");
        assert_eq!(restored[0].amount.cents(), 6400);
    }

    #[test]
    fn test_restore_with_bad_row_writes_nothing() {
        let mut export = two_row_export();
        export.transactions[1].category = "Salary".into();

        let target = Storage::in_memory().unwrap();
        let err = restore(&target, &export).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(target.transactions().count().unwrap(), 0);
    }

    #[test]
    fn test_restore_is_rolled_back_when_audit_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut target = Storage::in_memory().unwrap();
        target.enable_audit(temp_dir.path().to_path_buf());

        assert!(restore(&target, &two_row_export()).is_err());
        assert_eq!(target.transactions().count().unwrap(), 0);

        target.enable_audit(temp_dir.path().join("audit.log"));
        assert_eq!(restore(&target, &two_row_export()).unwrap(), 2);
        assert_eq!(target.transactions().count().unwrap(), 2);
    }
}
