//! CSV export of the transaction ledger

use std::io::Write;

use crate::error::TrackerResult;
use crate::storage::Storage;

/// Export every transaction to CSV, newest first
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> TrackerResult<usize> {
    let transactions = storage.transactions().list_all()?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Type", "Category", "Amount", "Date", "Description"])?;

    for txn in &transactions {
        csv.write_record([
            txn.id.to_string(),
            txn.kind.as_str().to_string(),
            txn.category.clone(),
            format!("{:.2}", txn.amount.as_f64()),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.description.clone(),
        ])?;
    }

    csv.flush()?;
    Ok(transactions.len())
}
