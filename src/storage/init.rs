//! Schema creation for the SQLite ledger

use log::info;
use rusqlite::Connection;

use crate::error::TrackerResult;

/// Schema version recorded in `PRAGMA user_version`
pub const SCHEMA_VERSION: i64 = 1;

const CREATE_TRANSACTIONS_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK (type IN ('Income', 'Expense')),
        category TEXT NOT NULL,
        amount INTEGER NOT NULL CHECK (amount > 0),
        date TEXT NOT NULL,
        description TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_type_date ON transactions (type, date);
";

/// Create the ledger schema if it does not exist yet
pub fn initialize_schema(conn: &Connection) -> TrackerResult<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    info!("Creating ledger schema version {}", SCHEMA_VERSION);
    conn.execute_batch(CREATE_TRANSACTIONS_TABLE_SQL)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

    Ok(())
}

/// Read the schema version recorded in the database
pub fn schema_version(conn: &Connection) -> TrackerResult<i64> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}
