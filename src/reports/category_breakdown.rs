//! Category breakdown report
//!
//! Per-category totals for one transaction kind over a reporting period,
//! with each category's share of the period total. This is the data behind
//! the expense distribution pie chart.

use chrono::NaiveDate;
use std::io::Write;

use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{DateRange, Money, ReportPeriod, TransactionKind};
use crate::storage::Storage;

const BAR_WIDTH: usize = 30;

/// One category's slice of the period total
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of the report total, 0-100
    pub percentage: f64,
}

/// Category breakdown report
#[derive(Debug, Clone)]
pub struct CategoryBreakdownReport {
    pub kind: TransactionKind,
    pub period: ReportPeriod,
    /// `None` for all time
    pub range: Option<DateRange>,
    /// Largest first; categories with no transactions are omitted
    pub slices: Vec<CategorySlice>,
    pub total: Money,
}

impl CategoryBreakdownReport {
    /// Generate the breakdown for `period` as seen on `today`
    pub fn generate(
        storage: &Storage,
        kind: TransactionKind,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> TrackerResult<Self> {
        let range = period.date_range(today);
        let totals = storage.transactions().category_totals(kind, range)?;
        let total = Money::checked_sum(totals.iter().map(|t| t.total))
            .ok_or_else(TrackerError::total_overflow)?;

        let slices = totals
            .into_iter()
            .map(|t| {
                let percentage = if total.is_zero() {
                    0.0
                } else {
                    (t.total.cents() as f64 / total.cents() as f64) * 100.0
                };
                CategorySlice {
                    category: t.category,
                    total: t.total,
                    transaction_count: t.count,
                    percentage,
                }
            })
            .collect();

        Ok(Self {
            kind,
            period,
            range,
            slices,
            total,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Chart title, e.g. "Expense Distribution - This Month"
    pub fn title(&self) -> String {
        format!("{} Distribution - {}", self.kind, self.period)
    }

    /// Message shown instead of a chart when nothing was recorded
    pub fn empty_message(&self) -> String {
        format!(
            "No {} data for this period",
            self.kind.as_str().to_lowercase()
        )
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&self.title());
        output.push('\n');
        if let Some(range) = &self.range {
            output.push_str(&format!("{} to {}\n", range.start, range.end));
        }
        output.push_str(&separator(72));
        output.push('\n');

        if self.is_empty() {
            output.push_str(&self.empty_message());
            output.push('\n');
            return output;
        }

        let max = self
            .slices
            .first()
            .map(|s| s.total.as_f64())
            .unwrap_or_default();

        for slice in &self.slices {
            output.push_str(&format!(
                "{:<14} {:>12} {:>7}  {}\n",
                slice.category,
                slice.total.format_with_symbol(symbol),
                format_percentage(slice.percentage),
                format_bar(slice.total.as_f64(), max, BAR_WIDTH)
            ));
        }

        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<14} {:>12}\n",
            "Total",
            self.total.format_with_symbol(symbol)
        ));

        output
    }

    /// Export the report rows as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let (start, end) = match &self.range {
            Some(range) => (range.start.to_string(), range.end.to_string()),
            None => (String::new(), String::new()),
        };

        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Type",
            "Start Date",
            "End Date",
            "Category",
            "Amount",
            "Transaction Count",
            "Percentage",
        ])?;

        for slice in &self.slices {
            csv.write_record([
                self.kind.as_str().to_string(),
                start.clone(),
                end.clone(),
                slice.category.clone(),
                format!("{:.2}", slice.total.as_f64()),
                slice.transaction_count.to_string(),
                format!("{:.2}", slice.percentage),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(storage: &Storage, kind: TransactionKind, category: &str, cents: i64, on: NaiveDate) {
        storage
            .transactions()
            .insert(&NewTransaction::new(kind, category, Money::from_cents(cents), on))
            .unwrap();
    }

    fn seeded() -> Storage {
        let storage = Storage::in_memory().unwrap();
        add(&storage, TransactionKind::Expense, "Rent", 75000, date(2025, 3, 1));
        add(&storage, TransactionKind::Expense, "Food", 15000, date(2025, 3, 4));
        add(&storage, TransactionKind::Expense, "Food", 10000, date(2025, 3, 20));
        add(&storage, TransactionKind::Expense, "Transport", 5000, date(2025, 2, 27));
        add(&storage, TransactionKind::Income, "Salary", 300000, date(2025, 3, 1));
        storage
    }

    #[test]
    fn test_this_month_breakdown() {
        let storage = seeded();
        let report = CategoryBreakdownReport::generate(
            &storage,
            TransactionKind::Expense,
            ReportPeriod::ThisMonth,
            date(2025, 3, 25),
        )
        .unwrap();

        assert_eq!(report.total.cents(), 100000);
        assert_eq!(report.slices.len(), 2);
        assert_eq!(report.slices[0].category, "Rent");
        assert!((report.slices[0].percentage - 75.0).abs() < f64::EPSILON);
        assert_eq!(report.slices[1].category, "Food");
        assert_eq!(report.slices[1].transaction_count, 2);
        assert!((report.slices[1].percentage - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let storage = seeded();
        let report = CategoryBreakdownReport::generate(
            &storage,
            TransactionKind::Expense,
            ReportPeriod::AllTime,
            date(2025, 3, 25),
        )
        .unwrap();

        let sum: f64 = report.slices.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!(report.range.is_none());
    }

    #[test]
    fn test_empty_period() {
        let storage = seeded();
        let report = CategoryBreakdownReport::generate(
            &storage,
            TransactionKind::Expense,
            ReportPeriod::LastWeek,
            date(2025, 6, 1),
        )
        .unwrap();

        assert!(report.is_empty());
        assert!(report.total.is_zero());
        let text = report.format_terminal("$");
        assert!(text.contains("Expense Distribution - Last Week"));
        assert!(text.contains("No expense data for this period"));
    }

    #[test]
    fn test_income_breakdown_ignores_expenses() {
        let storage = seeded();
        let report = CategoryBreakdownReport::generate(
            &storage,
            TransactionKind::Income,
            ReportPeriod::ThisMonth,
            date(2025, 3, 25),
        )
        .unwrap();

        assert_eq!(report.slices.len(), 1);
        assert_eq!(report.slices[0].category, "Salary");
        assert_eq!(report.title(), "Income Distribution - This Month");
    }

    #[test]
    fn test_format_terminal() {
        let storage = seeded();
        let report = CategoryBreakdownReport::generate(
            &storage,
            TransactionKind::Expense,
            ReportPeriod::ThisMonth,
            date(2025, 3, 25),
        )
        .unwrap();

        let text = report.format_terminal("$");
        assert!(text.contains("2025-03-01 to 2025-03-31"));
        assert!(text.contains("$750.00"));
        assert!(text.contains("75.0%"));
        assert!(text.contains("$1000.00"));
    }

    #[test]
    fn test_export_csv() {
        let storage = seeded();
        let report = CategoryBreakdownReport::generate(
            &storage,
            TransactionKind::Expense,
            ReportPeriod::ThisMonth,
            date(2025, 3, 25),
        )
        .unwrap();

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Type,Start Date,End Date,Category"));
        assert_eq!(lines[1], "Expense,2025-03-01,2025-03-31,Rent,750.00,1,75.00");
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let storage = Storage::in_memory().unwrap();
        let huge = 5_000_000_000_000_000_000;
        add(&storage, TransactionKind::Expense, "Food", huge, date(2025, 3, 1));
        add(&storage, TransactionKind::Expense, "Rent", huge, date(2025, 3, 2));

        let err = CategoryBreakdownReport::generate(
            &storage,
            TransactionKind::Expense,
            ReportPeriod::AllTime,
            date(2025, 3, 25),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
