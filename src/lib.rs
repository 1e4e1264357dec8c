//! Money Tracker - personal income and expense ledger
//!
//! This library provides the core functionality for the `money` command:
//! a SQLite ledger of income and expense transactions, filed under fixed
//! categories, with period reports on top of it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, categories, transactions, periods)
//! - `storage`: SQLite storage layer
//! - `services`: Validation and business logic
//! - `reports`: Dashboard, category breakdown and monthly trend
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export and restore
//! - `audit`: Audit logging system
//! - `cli`: Command handlers for the `money` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use money_tracker::config::{TrackerPaths, Settings};
//! use money_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
