//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Transaction;

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, symbol: &str) -> Self {
        Self {
            id: txn.id,
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            amount: txn.amount.format_with_symbol(symbol),
            date: txn.date.format("%Y-%m-%d").to_string(),
            description: truncate(&txn.description, DESCRIPTION_WIDTH),
        }
    }
}

/// Format transactions as a table, in the order given
pub fn format_transaction_table(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|txn| TransactionRow::new(txn, symbol))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .modify(Columns::single(3), Alignment::right());
    table.to_string()
}

/// Format a single transaction for the `show` command
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: #{}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;

    fn sample(id: i64, description: &str) -> Transaction {
        Transaction {
            id,
            kind: TransactionKind::Expense,
            category: "Shopping".into(),
            amount: Money::from_cents(4599),
            date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
            description: description.into(),
        }
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[], "$"), "No transactions found.");
    }

    #[test]
    fn test_table_contains_headers_and_rows() {
        let table = format_transaction_table(&[sample(1, "Shoes"), sample(2, "")], "$");
        for header in ["ID", "Type", "Category", "Amount", "Date", "Description"] {
            assert!(table.contains(header), "missing header {}", header);
        }
        assert!(table.contains("$45.99"));
        assert!(table.contains("2025-07-04"));
        assert!(table.contains("Shoes"));
    }

    #[test]
    fn test_details_skip_empty_description() {
        let details = format_transaction_details(&sample(3, ""), "€");
        assert!(details.contains("Transaction: #3"));
        assert!(details.contains("€45.99"));
        assert!(!details.contains("Description"));
    }
}
