//! Dashboard summary: all-time income, expenses and net balance

use crate::display::report::format_money_colored;
use crate::error::TrackerResult;
use crate::models::{Money, TransactionKind};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub transaction_count: usize,
}

impl DashboardSummary {
    pub fn generate(storage: &Storage) -> TrackerResult<Self> {
        let repo = storage.transactions();
        Ok(Self {
            total_income: repo.total_by_kind(TransactionKind::Income, None)?,
            total_expense: repo.total_by_kind(TransactionKind::Expense, None)?,
            transaction_count: repo.count()?,
        })
    }

    /// Income minus expenses
    pub fn net_balance(&self) -> Money {
        self.total_income - self.total_expense
    }

    /// A zero balance counts as a surplus
    pub fn is_surplus(&self) -> bool {
        !self.net_balance().is_negative()
    }

    pub fn format_terminal(&self, symbol: &str, color: bool) -> String {
        let mut output = String::new();
        output.push_str("Financial Dashboard\n");
        output.push_str("===================\n");
        output.push_str(&format!(
            "Total Income:   {}\n",
            self.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Total Expenses: {}\n",
            self.total_expense.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Net Balance:    {}\n",
            format_money_colored(self.net_balance(), symbol, color)
        ));
        output.push_str(&format!("Transactions:   {}\n", self.transaction_count));
        output
    }
}
