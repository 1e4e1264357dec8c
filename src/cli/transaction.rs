//! Transaction CLI commands
//!
//! Implements recording, listing, showing and deleting ledger rows.

use chrono::NaiveDate;
use clap::Args;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{TrackerError, TrackerResult};
use crate::models::TransactionKind;
use crate::services::{AddTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::{parse_date, parse_period, KindArg};

/// Arguments shared by `add`, `income` and `expense`
#[derive(Args, Debug)]
pub struct EntryArgs {
    /// Amount (e.g., "12.50" or "$1,200")
    #[arg(allow_negative_numbers = true)]
    pub amount: String,

    /// Category name (see `money categories`)
    #[arg(short, long)]
    pub category: String,

    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Description
    #[arg(short = 'm', long = "description", alias = "memo")]
    pub description: Option<String>,
}

/// Filters for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only income or only expenses
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// Period (this-month, last-month, this-week, last-week, all, YYYY-MM,
    /// or YYYY-MM-DD..YYYY-MM-DD); defaults to the configured period
    #[arg(short, long)]
    pub period: Option<String>,

    /// Filter by category name
    #[arg(short, long)]
    pub category: Option<String>,

    /// Maximum number of rows to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Record an income or expense
pub fn handle_add_command(
    storage: &Storage,
    settings: &Settings,
    kind: TransactionKind,
    args: EntryArgs,
    today: NaiveDate,
) -> TrackerResult<()> {
    let amount = TransactionService::parse_amount(&args.amount)?;
    let date = match args.date {
        Some(date_str) => parse_date(&date_str)?,
        None => today,
    };

    let service = TransactionService::new(storage);
    let txn = service.add(AddTransactionInput {
        kind,
        amount,
        category: args.category,
        date,
        description: args.description,
    })?;

    println!(
        "Recorded {} #{}: {} {} on {}",
        txn.kind.as_str().to_lowercase(),
        txn.id,
        txn.amount.format_with_symbol(&settings.currency_symbol),
        txn.category,
        txn.date
    );

    Ok(())
}

/// List transactions, newest first
pub fn handle_list_command(
    storage: &Storage,
    settings: &Settings,
    args: ListArgs,
    today: NaiveDate,
) -> TrackerResult<()> {
    let period = match args.period {
        Some(p) => parse_period(&p)?,
        None => settings.default_period,
    };

    let mut filter = TransactionFilter::new().period(period);
    if let Some(kind) = args.kind {
        filter = filter.kind(kind.into());
    }
    if let Some(category) = args.category {
        filter = filter.category(category);
    }
    if let Some(limit) = args.limit {
        filter = filter.limit(limit);
    }

    let service = TransactionService::new(storage);
    let transactions = service.list(&filter, today)?;

    println!("Transactions - {}", period);
    println!(
        "{}",
        format_transaction_table(&transactions, &settings.currency_symbol)
    );
    if !transactions.is_empty() {
        println!("{} transaction(s)", transactions.len());
    }

    Ok(())
}

/// Show one transaction in full
pub fn handle_show_command(storage: &Storage, settings: &Settings, id: &str) -> TrackerResult<()> {
    let service = TransactionService::new(storage);
    let txn = service
        .find(id)?
        .ok_or_else(|| TrackerError::transaction_not_found(id))?;

    print!(
        "{}",
        format_transaction_details(&txn, &settings.currency_symbol)
    );
    Ok(())
}

/// Delete a transaction; without `force` only shows what would be removed
pub fn handle_delete_command(
    storage: &Storage,
    settings: &Settings,
    id: &str,
    force: bool,
) -> TrackerResult<()> {
    let service = TransactionService::new(storage);
    let txn = service
        .find(id)?
        .ok_or_else(|| TrackerError::transaction_not_found(id))?;

    if !force {
        println!("About to delete transaction:");
        print!(
            "{}",
            format_transaction_details(&txn, &settings.currency_symbol)
        );
        println!();
        println!("Use --force to confirm deletion");
        return Ok(());
    }

    let deleted = service.delete(txn.id)?;
    println!(
        "Deleted transaction #{} ({} {} {})",
        deleted.id,
        deleted.date,
        deleted.category,
        deleted.amount.format_with_symbol(&settings.currency_symbol)
    );

    Ok(())
}
