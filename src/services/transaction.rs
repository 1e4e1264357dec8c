//! Transaction service
//!
//! Validation and audit logging on top of the transaction repository.

use chrono::NaiveDate;
use log::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Money, MoneyParseError, NewTransaction, ReportPeriod, Transaction, TransactionId,
    TransactionKind, MAX_AMOUNT,
};
use crate::storage::{Storage, TransactionQuery};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    /// Resolved against "today" when listing; `None` means all time
    pub period: Option<ReportPeriod>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn period(mut self, period: ReportPeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for recording a transaction
#[derive(Debug, Clone)]
pub struct AddTransactionInput {
    pub kind: TransactionKind,
    pub amount: Money,
    /// Any capitalisation of a category valid for `kind`
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse a user-entered amount
    pub fn parse_amount(input: &str) -> TrackerResult<Money> {
        Money::parse(input).map_err(|e| match e {
            MoneyParseError::TooPrecise(_) => TrackerError::Validation(e.to_string()),
            MoneyParseError::InvalidFormat(_) => {
                TrackerError::Validation("Please enter a valid amount.".into())
            }
        })
    }

    /// Validate and record a transaction
    ///
    /// The row is only committed once its audit line has been written.
    pub fn add(&self, input: AddTransactionInput) -> TrackerResult<Transaction> {
        let mut added = self.add_all(vec![input])?;
        added
            .pop()
            .ok_or_else(|| TrackerError::Validation("Nothing to record".into()))
    }

    /// Validate and record several transactions, all or none
    ///
    /// Every input is validated before anything is written. Rows and audit
    /// lines are then written inside one SQLite transaction, which is rolled
    /// back if any insert or audit append fails.
    pub fn add_all(&self, inputs: Vec<AddTransactionInput>) -> TrackerResult<Vec<Transaction>> {
        let rows = inputs
            .into_iter()
            .map(validate_input)
            .collect::<TrackerResult<Vec<_>>>()?;

        self.storage.in_transaction(|| {
            let repo = self.storage.transactions();
            let added = rows
                .iter()
                .map(|new| repo.insert(new))
                .collect::<TrackerResult<Vec<_>>>()?;
            for txn in &added {
                self.storage.log_create(txn)?;
            }
            Ok(added)
        })
    }


    pub fn get(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        self.storage.transactions().get(id)
    }

    /// Look up a transaction by a user-supplied id ("12" or "#12")
    pub fn find(&self, identifier: &str) -> TrackerResult<Option<Transaction>> {
        let id = parse_id(identifier)?;
        self.get(id)
    }

    /// List transactions matching `filter`, newest first
    pub fn list(
        &self,
        filter: &TransactionFilter,
        today: NaiveDate,
    ) -> TrackerResult<Vec<Transaction>> {
        let category = match (&filter.category, filter.kind) {
            (Some(name), Some(kind)) => Some(
                kind.canonical_category(name)
                    .map(str::to_string)
                    .unwrap_or_else(|| name.trim().to_string()),
            ),
            (Some(name), None) => Some(canonical_any(name)),
            (None, _) => None,
        };

        let query = TransactionQuery {
            kind: filter.kind,
            range: filter.period.and_then(|p| p.date_range(today)),
            category,
            limit: filter.limit,
        };
        debug!("Listing transactions with {:?}", query);

        self.storage.transactions().search(&query)
    }

    /// Delete a transaction, returning the removed row
    pub fn delete(&self, id: TransactionId) -> TrackerResult<Transaction> {
        let txn = self
            .get(id)?
            .ok_or_else(|| TrackerError::transaction_not_found(id))?;

        self.storage.in_transaction(|| {
            if !self.storage.transactions().delete(id)? {
                return Err(TrackerError::transaction_not_found(id));
            }
            self.storage.log_delete(&txn)
        })?;

        Ok(txn)
    }
}

/// Check an input and turn it into a row ready for insertion
fn validate_input(input: AddTransactionInput) -> TrackerResult<NewTransaction> {
    if !input.amount.is_positive() {
        return Err(TrackerError::Validation(
            "Amount must be greater than zero.".into(),
        ));
    }
    if input.amount > MAX_AMOUNT {
        return Err(TrackerError::Validation(format!(
            "Amount must not exceed {}.",
            MAX_AMOUNT
        )));
    }

    let category = input.kind.canonical_category(&input.category).ok_or_else(|| {
        TrackerError::Validation(format!(
            "'{}' is not a valid {} category. Choose one of: {}",
            input.category.trim(),
            input.kind.as_str().to_lowercase(),
            input.kind.categories().join(", ")
        ))
    })?;

    let description = input
        .description
        .map(|d| d.trim().to_string())
        .unwrap_or_default();

    Ok(
        NewTransaction::new(input.kind, category, input.amount, input.date)
            .with_description(description),
    )
}

fn parse_id(identifier: &str) -> TrackerResult<TransactionId> {
    let trimmed = identifier.trim();
    trimmed
        .strip_prefix('#')
        .unwrap_or(trimmed)
        .parse::<TransactionId>()
        .map_err(|_| TrackerError::Validation(format!("Invalid transaction id: {}", identifier)))
}

/// Canonical spelling of a category from either list, or the input as typed
fn canonical_any(name: &str) -> String {
    TransactionKind::all()
        .iter()
        .find_map(|kind| kind.canonical_category(name))
        .map(str::to_string)
        .unwrap_or_else(|| name.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(
        kind: TransactionKind,
        cents: i64,
        category: &str,
        on: NaiveDate,
    ) -> AddTransactionInput {
        AddTransactionInput {
            kind,
            amount: Money::from_cents(cents),
            category: category.into(),
            date: on,
            description: None,
        }
    }

    #[test]
    fn test_add_canonicalises_category() {
        let storage = Storage::in_memory().unwrap();
        let service = TransactionService::new(&storage);

        let mut add = input(TransactionKind::Expense, 450, "food", date(2025, 3, 3));
        add.description = Some("  Coffee  ".into());
        let txn = service.add(add).unwrap();

        assert_eq!(txn.category, "Food");
        assert_eq!(txn.description, "Coffee");
        assert_eq!(service.get(txn.id).unwrap().unwrap(), txn);
    }

    #[test]
    fn test_add_rejects_non_positive_amount() {
        let storage = Storage::in_memory().unwrap();
        let service = TransactionService::new(&storage);

        for cents in [0, -100] {
            let err = service
                .add(input(TransactionKind::Income, cents, "Salary", date(2025, 3, 3)))
                .unwrap_err();
            assert!(err.is_validation());
            assert!(err.to_string().contains("greater than zero"));
        }
        assert_eq!(storage.transactions().count().unwrap(), 0);
    }

    #[test]
    fn test_add_rejects_category_of_other_kind() {
        let storage = Storage::in_memory().unwrap();
        let service = TransactionService::new(&storage);

        let err = service
            .add(input(TransactionKind::Income, 100, "Rent", date(2025, 3, 3)))
            .unwrap_err();
        assert!(err.to_string().contains("not a valid income category"));
    }

    #[test]
    fn test_parse_amount_messages() {
        assert_eq!(
            TransactionService::parse_amount("12.30").unwrap(),
            Money::from_cents(1230)
        );
        let err = TransactionService::parse_amount("twelve").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Please enter a valid amount.");
    }

    #[test]
    fn test_list_with_period_and_kind() {
        let storage = Storage::in_memory().unwrap();
        let service = TransactionService::new(&storage);
        service.add(input(TransactionKind::Expense, 100, "Food", date(2025, 2, 28))).unwrap();
        service.add(input(TransactionKind::Expense, 200, "Food", date(2025, 3, 1))).unwrap();
        service.add(input(TransactionKind::Income, 900, "Salary", date(2025, 3, 2))).unwrap();

        let today = date(2025, 3, 15);
        let march = service
            .list(&TransactionFilter::new().period(ReportPeriod::ThisMonth), today)
            .unwrap();
        assert_eq!(march.len(), 2);

        let march_expenses = service
            .list(
                &TransactionFilter::new()
                    .period(ReportPeriod::ThisMonth)
                    .kind(TransactionKind::Expense),
                today,
            )
            .unwrap();
        assert_eq!(march_expenses.len(), 1);
        assert_eq!(march_expenses[0].amount.cents(), 200);

        let food = service
            .list(&TransactionFilter::new().category("FOOD").limit(1), today)
            .unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].date, date(2025, 3, 1));
    }

    #[test]
    fn test_find_accepts_hash_prefix() {
        let storage = Storage::in_memory().unwrap();
        let service = TransactionService::new(&storage);
        let txn = service
            .add(input(TransactionKind::Income, 100, "Gift", date(2025, 1, 1)))
            .unwrap();

        assert!(service.find(&format!("#{}", txn.id)).unwrap().is_some());
        assert!(service.find("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_delete_is_audited() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = Storage::in_memory().unwrap();
        storage.enable_audit(temp_dir.path().join("audit.log"));
        let service = TransactionService::new(&storage);

        let txn = service
            .add(input(TransactionKind::Expense, 5000, "Utilities", date(2025, 1, 9)))
            .unwrap();
        let deleted = service.delete(txn.id).unwrap();
        assert_eq!(deleted, txn);

        let err = service.delete(txn.id).unwrap_err();
        assert!(err.is_not_found());

        let entries = storage.audit_logger().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].transaction, txn);
    }

    #[test]
    fn test_add_rejects_amount_over_maximum() {
        let storage = Storage::in_memory().unwrap();
        let service = TransactionService::new(&storage);

        let huge = TransactionService::parse_amount("50000000000000000").unwrap();
        let mut add = input(TransactionKind::Expense, 0, "Food", date(2025, 3, 3));
        add.amount = huge;

        let err = service.add(add).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("must not exceed"));

        let mut at_limit = input(TransactionKind::Expense, 0, "Rent", date(2025, 3, 3));
        at_limit.amount = MAX_AMOUNT;
        assert!(service.add(at_limit).is_ok());
    }

    #[test]
    fn test_add_all_writes_nothing_when_one_input_is_invalid() {
        let storage = Storage::in_memory().unwrap();
        let service = TransactionService::new(&storage);

        let err = service
            .add_all(vec![
                input(TransactionKind::Expense, 100, "Food", date(2025, 3, 3)),
                input(TransactionKind::Expense, 200, "Salary", date(2025, 3, 4)),
            ])
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(storage.transactions().count().unwrap(), 0);
    }

    #[test]
    fn test_failed_audit_rolls_back_the_write() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = Storage::in_memory().unwrap();
        // a directory cannot be opened for appending
        storage.enable_audit(temp_dir.path().to_path_buf());
        let service = TransactionService::new(&storage);

        assert!(service
            .add(input(TransactionKind::Income, 100, "Gift", date(2025, 1, 1)))
            .is_err());
        assert!(service
            .add_all(vec![
                input(TransactionKind::Income, 100, "Gift", date(2025, 1, 1)),
                input(TransactionKind::Expense, 50, "Food", date(2025, 1, 2)),
            ])
            .is_err());
        assert_eq!(storage.transactions().count().unwrap(), 0);
    }

    #[test]
    fn test_failed_audit_keeps_deleted_row() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = Storage::in_memory().unwrap();
        let txn = TransactionService::new(&storage)
            .add(input(TransactionKind::Expense, 700, "Transport", date(2025, 1, 1)))
            .unwrap();

        storage.enable_audit(temp_dir.path().to_path_buf());
        let service = TransactionService::new(&storage);
        assert!(service.delete(txn.id).is_err());
        assert!(service.get(txn.id).unwrap().is_some());
    }
}
