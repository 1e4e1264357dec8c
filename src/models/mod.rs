//! Core data models for the money tracker
//!
//! Transactions, their kinds and categories, money amounts and the periods
//! reports are bucketed by.

pub mod category;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{TransactionKind, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use money::{Money, MoneyParseError, MAX_AMOUNT};
pub use period::{DateRange, PeriodParseError, ReportPeriod, YearMonth};
pub use transaction::{NewTransaction, Transaction, TransactionId};
