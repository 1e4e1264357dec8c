//! Transaction repository over the SQLite ledger
//!
//! All listing queries return newest first. Date filters are inclusive and
//! compare the stored `YYYY-MM-DD` text, which sorts chronologically.

use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::TrackerResult;
use crate::models::{DateRange, Money, NewTransaction, Transaction, TransactionId, TransactionKind};

const SELECT_TRANSACTIONS_SQL: &str = r"
    SELECT id, type, category, amount, date, description
    FROM transactions
";

/// Total for one category, as returned by `category_totals`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

/// Filter for `TransactionRepository::search`; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub kind: Option<TransactionKind>,
    pub range: Option<DateRange>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// Repository for transaction persistence
pub struct TransactionRepository<'a> {
    conn: &'a Connection,
}

impl<'a> TransactionRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a transaction and return it with its assigned id
    pub fn insert(&self, new: &NewTransaction) -> TrackerResult<Transaction> {
        debug!(
            "Inserting {} {} in {} on {}",
            new.kind, new.amount, new.category, new.date
        );
        self.conn.execute(
            "INSERT INTO transactions (type, category, amount, date, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![new.kind, new.category, new.amount, new.date, new.description],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("Inserted transaction {}", id);

        Ok(Transaction {
            id,
            kind: new.kind,
            category: new.category.clone(),
            amount: new.amount,
            date: new.date,
            description: new.description.clone(),
        })
    }

    pub fn get(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        let sql = format!("{} WHERE id = ?1", SELECT_TRANSACTIONS_SQL);
        Ok(self
            .conn
            .query_row(&sql, params![id], map_transaction)
            .optional()?)
    }

    /// Every transaction, newest first
    pub fn list_all(&self) -> TrackerResult<Vec<Transaction>> {
        self.search(&TransactionQuery::default())
    }

    pub fn list_by_kind(&self, kind: TransactionKind) -> TrackerResult<Vec<Transaction>> {
        self.search(&TransactionQuery {
            kind: Some(kind),
            ..Default::default()
        })
    }

    pub fn list_by_date_range(&self, range: DateRange) -> TrackerResult<Vec<Transaction>> {
        self.search(&TransactionQuery {
            range: Some(range),
            ..Default::default()
        })
    }

    /// Transactions matching every set field of `query`, newest first
    pub fn search(&self, query: &TransactionQuery) -> TrackerResult<Vec<Transaction>> {
        let sql = format!(
            "{} WHERE (?1 IS NULL OR type = ?1)
               AND (?2 IS NULL OR date >= ?2)
               AND (?3 IS NULL OR date <= ?3)
               AND (?4 IS NULL OR category = ?4)
             ORDER BY date DESC, id DESC
             LIMIT ?5",
            SELECT_TRANSACTIONS_SQL
        );
        let (start, end) = split_range(query.range);
        // SQLite treats a negative LIMIT as unbounded
        let limit = query
            .limit
            .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
            .unwrap_or(-1);

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![query.kind, start, end, query.category, limit],
            map_transaction,
        )?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Sum of amounts per category for one kind, largest first
    pub fn category_totals(
        &self,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> TrackerResult<Vec<CategoryTotal>> {
        let (start, end) = split_range(range);
        let mut stmt = self.conn.prepare(
            "SELECT category, SUM(amount), COUNT(*)
             FROM transactions
             WHERE type = ?1
               AND (?2 IS NULL OR date >= ?2)
               AND (?3 IS NULL OR date <= ?3)
             GROUP BY category
             ORDER BY SUM(amount) DESC, category ASC",
        )?;
        let rows = stmt.query_map(params![kind, start, end], |row| {
            let count: i64 = row.get(2)?;
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
                count: usize::try_from(count).unwrap_or_default(),
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Sum of amounts for one kind; zero when nothing matches
    pub fn total_by_kind(
        &self,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> TrackerResult<Money> {
        let (start, end) = split_range(range);
        Ok(self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0)
             FROM transactions
             WHERE type = ?1
               AND (?2 IS NULL OR date >= ?2)
               AND (?3 IS NULL OR date <= ?3)",
            params![kind, start, end],
            |row| row.get(0),
        )?)
    }

    /// Delete by id. Returns false when no row had that id.
    pub fn delete(&self, id: TransactionId) -> TrackerResult<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        debug!("Deleted transaction {} ({} rows)", id, affected);
        Ok(affected > 0)
    }

    pub fn count(&self) -> TrackerResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn split_range(range: Option<DateRange>) -> (Option<NaiveDate>, Option<NaiveDate>) {
    match range {
        Some(range) => (Some(range.start), Some(range.end)),
        None => (None, None),
    }
}

fn map_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        kind: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        date: row.get(4)?,
        description: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(category: &str, cents: i64, on: NaiveDate) -> NewTransaction {
        NewTransaction::new(TransactionKind::Expense, category, Money::from_cents(cents), on)
    }

    fn income(category: &str, cents: i64, on: NaiveDate) -> NewTransaction {
        NewTransaction::new(TransactionKind::Income, category, Money::from_cents(cents), on)
    }

    fn seeded() -> Storage {
        let storage = Storage::in_memory().unwrap();
        let repo = storage.transactions();
        repo.insert(&income("Salary", 300000, date(2025, 1, 1))).unwrap();
        repo.insert(&expense("Food", 1500, date(2025, 1, 3))).unwrap();
        repo.insert(&expense("Rent", 120000, date(2025, 1, 5))).unwrap();
        repo.insert(&expense("Food", 2500, date(2025, 1, 31))).unwrap();
        repo.insert(&expense("Food", 999, date(2025, 2, 1))).unwrap();
        storage
    }

    #[test]
    fn test_insert_and_get() {
        let storage = Storage::in_memory().unwrap();
        let repo = storage.transactions();

        let inserted = repo
            .insert(&expense("Food", 1234, date(2025, 1, 2)).with_description("Lunch"))
            .unwrap();
        let fetched = repo.get(inserted.id).unwrap().unwrap();

        assert_eq!(fetched, inserted);
        assert_eq!(fetched.description, "Lunch");
        assert!(repo.get(inserted.id + 1).unwrap().is_none());
    }

    #[test]
    fn test_list_all_is_newest_first() {
        let storage = seeded();
        let all = storage.transactions().list_all().unwrap();

        assert_eq!(all.len(), 5);
        assert_eq!(all[0].date, date(2025, 2, 1));
        assert_eq!(all[4].date, date(2025, 1, 1));
    }

    #[test]
    fn test_same_day_orders_by_id_desc() {
        let storage = Storage::in_memory().unwrap();
        let repo = storage.transactions();
        let first = repo.insert(&expense("Food", 100, date(2025, 1, 1))).unwrap();
        let second = repo.insert(&expense("Rent", 100, date(2025, 1, 1))).unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[test]
    fn test_list_by_kind() {
        let storage = seeded();
        let incomes = storage
            .transactions()
            .list_by_kind(TransactionKind::Income)
            .unwrap();
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].category, "Salary");
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let storage = seeded();
        let range = DateRange::new(date(2025, 1, 3), date(2025, 1, 31)).unwrap();
        let in_range = storage.transactions().list_by_date_range(range).unwrap();

        assert_eq!(in_range.len(), 3);
        assert!(in_range.iter().all(|t| range.contains(t.date)));
    }

    #[test]
    fn test_search_with_category_and_limit() {
        let storage = seeded();
        let found = storage
            .transactions()
            .search(&TransactionQuery {
                category: Some("Food".into()),
                limit: Some(2),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].amount.cents(), 999);
        assert_eq!(found[1].amount.cents(), 2500);
    }

    #[test]
    fn test_category_totals() {
        let storage = seeded();
        let january = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        let totals = storage
            .transactions()
            .category_totals(TransactionKind::Expense, Some(january))
            .unwrap();

        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "Rent".into(),
                    total: Money::from_cents(120000),
                    count: 1,
                },
                CategoryTotal {
                    category: "Food".into(),
                    total: Money::from_cents(4000),
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn test_category_totals_all_time() {
        let storage = seeded();
        let totals = storage
            .transactions()
            .category_totals(TransactionKind::Expense, None)
            .unwrap();
        let food = totals.iter().find(|t| t.category == "Food").unwrap();
        assert_eq!(food.total.cents(), 4999);
        assert_eq!(food.count, 3);
    }

    #[test]
    fn test_total_by_kind() {
        let storage = seeded();
        let repo = storage.transactions();

        assert_eq!(
            repo.total_by_kind(TransactionKind::Expense, None).unwrap().cents(),
            124999
        );
        let february = DateRange::new(date(2025, 2, 1), date(2025, 2, 28)).unwrap();
        assert_eq!(
            repo.total_by_kind(TransactionKind::Income, Some(february))
                .unwrap(),
            Money::zero()
        );
    }

    #[test]
    fn test_delete() {
        let storage = seeded();
        let repo = storage.transactions();
        let victim = repo.list_all().unwrap()[0].id;

        assert!(repo.delete(victim).unwrap());
        assert!(!repo.delete(victim).unwrap());
        assert_eq!(repo.count().unwrap(), 4);
    }
}
