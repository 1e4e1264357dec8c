//! Monthly income vs expense trend
//!
//! Income and expense totals for each of the last N calendar months, ending
//! with the current month. This is the data behind the income/expense bar
//! chart.

use chrono::NaiveDate;
use std::io::Write;

use crate::display::report::{format_bar, separator};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, TransactionKind, YearMonth};
use crate::storage::Storage;

/// Longest trend that can be requested
pub const MAX_TREND_MONTHS: u32 = 120;

const BAR_WIDTH: usize = 30;

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub month: YearMonth,
    pub income: Money,
    pub expense: Money,
}

impl MonthlyTotals {
    pub fn net(&self) -> Money {
        self.income - self.expense
    }

    /// Axis label, e.g. "Mar 25"
    pub fn label(&self) -> String {
        self.month.short_label()
    }
}

/// Monthly trend report
#[derive(Debug, Clone)]
pub struct MonthlyTrendReport {
    /// Oldest first; the last entry is the month containing "today"
    pub months: Vec<MonthlyTotals>,
    pub total_income: Money,
    pub total_expense: Money,
}

impl MonthlyTrendReport {
    /// Generate the trend for the `months` months ending with `today`'s month
    pub fn generate(storage: &Storage, months: u32, today: NaiveDate) -> TrackerResult<Self> {
        if months == 0 || months > MAX_TREND_MONTHS {
            return Err(TrackerError::Validation(format!(
                "Trend length must be between 1 and {} months, got {}",
                MAX_TREND_MONTHS, months
            )));
        }

        let repo = storage.transactions();

        let mut month = YearMonth::containing(today);
        for _ in 1..months {
            month = month.prev();
        }

        let mut totals = Vec::with_capacity(months as usize);
        for _ in 0..months {
            let range = Some(month.range());
            totals.push(MonthlyTotals {
                month,
                income: repo.total_by_kind(TransactionKind::Income, range)?,
                expense: repo.total_by_kind(TransactionKind::Expense, range)?,
            });
            month = month.next();
        }

        let total_income = Money::checked_sum(totals.iter().map(|m| m.income))
            .ok_or_else(TrackerError::total_overflow)?;
        let total_expense = Money::checked_sum(totals.iter().map(|m| m.expense))
            .ok_or_else(TrackerError::total_overflow)?;

        Ok(Self {
            months: totals,
            total_income,
            total_expense,
        })
    }

    /// Chart title, e.g. "Income vs Expenses - Last 6 Months"
    pub fn title(&self) -> String {
        match self.months.len() {
            1 => "Income vs Expenses - This Month".to_string(),
            n => format!("Income vs Expenses - Last {} Months", n),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&self.title());
        output.push('\n');
        output.push_str(&separator(72));
        output.push('\n');

        let max = self
            .months
            .iter()
            .map(|m| m.income.max(m.expense))
            .max()
            .unwrap_or_default()
            .as_f64();

        for totals in &self.months {
            output.push_str(&format!(
                "{:<7} Income  {:>12}  {}\n",
                totals.label(),
                totals.income.format_with_symbol(symbol),
                format_bar(totals.income.as_f64(), max, BAR_WIDTH)
            ));
            output.push_str(&format!(
                "{:<7} Expense {:>12}  {}\n",
                "",
                totals.expense.format_with_symbol(symbol),
                format_bar(totals.expense.as_f64(), max, BAR_WIDTH)
            ));
        }

        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&format!(
            "Total income:  {}\n",
            self.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Total expense: {}\n",
            self.total_expense.format_with_symbol(symbol)
        ));

        output
    }

    /// Export one row per month as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Month", "Label", "Income", "Expense", "Net"])?;

        for totals in &self.months {
            csv.write_record([
                totals.month.to_string(),
                totals.label(),
                format!("{:.2}", totals.income.as_f64()),
                format!("{:.2}", totals.expense.as_f64()),
                format!("{:.2}", totals.net().as_f64()),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}
