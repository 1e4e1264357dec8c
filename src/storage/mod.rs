//! Storage layer for the money tracker
//!
//! A single SQLite database holds the ledger. `Storage` owns the connection
//! and hands out repositories that borrow it.

pub mod init;
pub mod transactions;

pub use init::{initialize_schema, SCHEMA_VERSION};
pub use transactions::{CategoryTotal, TransactionQuery, TransactionRepository};

use std::path::{Path, PathBuf};

use log::debug;
use rusqlite::Connection;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::TrackerPaths;
use crate::error::TrackerResult;
use crate::models::Transaction;

/// Owner of the ledger connection and, when enabled, the audit log
pub struct Storage {
    conn: Connection,
    location: Option<PathBuf>,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Open (creating if needed) the ledger under the configured paths
    pub fn open(paths: &TrackerPaths) -> TrackerResult<Self> {
        paths.ensure_directories()?;
        Self::open_file(paths.database_file())
    }

    /// Open a ledger at an explicit file path
    pub fn open_file(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!("Opening ledger at {}", path.display());
        let conn = Connection::open(path)?;
        initialize_schema(&conn)?;

        Ok(Self {
            conn,
            location: Some(path.to_path_buf()),
            audit: None,
        })
    }

    /// A throwaway ledger, used by tests
    pub fn in_memory() -> TrackerResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn,
            location: None,
            audit: None,
        })
    }

    /// Record creates and deletes in the audit log at `path`
    pub fn enable_audit(&mut self, path: PathBuf) {
        self.audit = Some(AuditLogger::new(path));
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Audit a newly written transaction; no-op when auditing is off
    pub fn log_create(&self, transaction: &Transaction) -> TrackerResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::created(transaction)),
            None => Ok(()),
        }
    }

    /// Audit a removed transaction; no-op when auditing is off
    pub fn log_delete(&self, transaction: &Transaction) -> TrackerResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::deleted(transaction)),
            None => Ok(()),
        }
    }

    /// Run `f` inside one SQLite transaction, committing only if it succeeds
    ///
    /// Inside an already open transaction `f` joins it, so the outer call
    /// decides whether anything is committed.
    pub fn in_transaction<T>(&self, f: impl FnOnce() -> TrackerResult<T>) -> TrackerResult<T> {
        if !self.conn.is_autocommit() {
            return f();
        }

        let tx = self.conn.unchecked_transaction()?;
        let value = f()?;
        tx.commit()?;
        Ok(value)
    }

    pub fn transactions(&self) -> TransactionRepository<'_> {
        TransactionRepository::new(&self.conn)
    }

    /// Database file, or `None` for an in-memory ledger
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn schema_version(&self) -> TrackerResult<i64> {
        init::schema_version(&self.conn)
    }
}
