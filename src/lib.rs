//! fintrack - personal finance tracking with a reconciling ledger
//!
//! Transactions are the source of truth. A transaction routed to an asset
//! or a savings goal moves that account's balance when recorded, and voiding
//! it moves the balance back. The budget is never stored as a running total;
//! it is recomputed from the log on every query.
//!
//! # Architecture
//!
//! - `models`: money, ids, transactions, assets, goals, budget, categories
//! - `services`: the account store, budget tracker, filters and the [`services::Ledger`]
//! - `reports`: category breakdown, period comparison, net worth
//! - `storage`: JSON persistence behind the [`storage::StateSink`] trait
//! - `audit`: append-only JSONL change log
//! - `config`: paths and user settings
//! - `cli` / `display`: command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::FintrackPaths;
//! use fintrack::services::Ledger;
//! use fintrack::storage::JsonStore;
//!
//! let mut store = JsonStore::new(FintrackPaths::new()?)?;
//! let state = store.load(today)?;
//! let mut ledger = Ledger::new(state, store);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FintrackError, FintrackResult};
