//! Reports module for the money tracker
//!
//! Provides the dashboard totals, the per-category breakdown for a period
//! and the month-by-month income/expense trend.

pub mod category_breakdown;
pub mod dashboard;
pub mod monthly_trend;

pub use category_breakdown::{CategoryBreakdownReport, CategorySlice};
pub use dashboard::DashboardSummary;
pub use monthly_trend::{MonthlyTotals, MonthlyTrendReport, MAX_TREND_MONTHS};
