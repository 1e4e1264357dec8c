//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod export;
pub mod report;
pub mod transaction;

pub use audit::handle_audit_command;
pub use category::handle_categories_command;
pub use export::{handle_export_command, handle_import_command, ExportFormat};
pub use report::{handle_dashboard_command, handle_report_command, ReportCommands};
pub use transaction::{
    handle_add_command, handle_delete_command, handle_list_command, handle_show_command,
    EntryArgs, ListArgs,
};

use chrono::NaiveDate;
use clap::ValueEnum;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{ReportPeriod, TransactionKind};

/// Transaction type as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

pub(crate) fn parse_period(input: &str) -> TrackerResult<ReportPeriod> {
    ReportPeriod::parse(input).map_err(|e| {
        TrackerError::Validation(format!(
            "{}. Use this-month, last-month, this-week, last-week, all, YYYY-MM or YYYY-MM-DD..YYYY-MM-DD",
            e
        ))
    })
}

pub(crate) fn parse_date(input: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        TrackerError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", input))
    })
}

pub(crate) fn create_output(path: &Path) -> TrackerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
