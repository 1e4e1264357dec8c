//! CLI commands for reports
//!
//! Dashboard summary, category breakdown and monthly trend, with optional
//! CSV export of the report rows.

use chrono::NaiveDate;
use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::TrackerResult;
use crate::reports::{CategoryBreakdownReport, DashboardSummary, MonthlyTrendReport};
use crate::storage::Storage;

use super::{create_output, parse_period, KindArg};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals per category for a period (pie chart data)
    #[command(alias = "pie")]
    Breakdown {
        /// Report on income or expenses
        #[arg(short, long, value_enum, default_value = "expense")]
        kind: KindArg,

        /// Period (this-month, last-month, this-week, last-week, all,
        /// YYYY-MM, or YYYY-MM-DD..YYYY-MM-DD); defaults to the configured period
        #[arg(short, long)]
        period: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income vs expenses for the last N months (bar chart data)
    #[command(alias = "bar")]
    Trend {
        /// Number of months, ending with the current one
        #[arg(short, long)]
        months: Option<u32>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
    today: NaiveDate,
) -> TrackerResult<()> {
    match cmd {
        ReportCommands::Breakdown {
            kind,
            period,
            output,
        } => {
            let period = match period {
                Some(p) => parse_period(&p)?,
                None => settings.default_period,
            };

            let report = CategoryBreakdownReport::generate(storage, kind.into(), period, today)?;
            print!("{}", report.format_terminal(&settings.currency_symbol));

            if let Some(path) = output {
                report.export_csv(create_output(&path)?)?;
                println!();
                println!("Report exported to: {}", path.display());
            }
        }

        ReportCommands::Trend { months, output } => {
            let months = months.unwrap_or(settings.trend_months);

            let report = MonthlyTrendReport::generate(storage, months, today)?;
            print!("{}", report.format_terminal(&settings.currency_symbol));

            if let Some(path) = output {
                report.export_csv(create_output(&path)?)?;
                println!();
                println!("Report exported to: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Print the all-time dashboard summary
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    color: bool,
) -> TrackerResult<()> {
    let summary = DashboardSummary::generate(storage)?;
    print!(
        "{}",
        summary.format_terminal(&settings.currency_symbol, color)
    );
    Ok(())
}
