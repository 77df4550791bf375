//! Persistence boundary for fintrack
//!
//! The ledger never touches the filesystem itself. After each mutation it
//! hands the affected collection to a [`StateSink`]; [`JsonStore`] writes
//! it to disk, [`NullSink`] drops it.

pub mod file_io;
pub mod json_store;
pub mod seed;

pub use file_io::{read_json, write_json_atomic};
pub use json_store::JsonStore;

use crate::audit::AuditEntry;
use crate::error::FintrackResult;
use crate::models::{Asset, BudgetConfig, Category, Goal, Transaction};

/// One collection's full contents after a mutation
#[derive(Debug, Clone, Copy)]
pub enum Snapshot<'a> {
    Assets(&'a [Asset]),
    Goals(&'a [Goal]),
    Transactions(&'a [Transaction]),
    Budget(&'a BudgetConfig),
    Categories(&'a [Category]),
}

impl Snapshot<'_> {
    pub fn collection(&self) -> &'static str {
        match self {
            Snapshot::Assets(_) => "assets",
            Snapshot::Goals(_) => "goals",
            Snapshot::Transactions(_) => "transactions",
            Snapshot::Budget(_) => "budget",
            Snapshot::Categories(_) => "categories",
        }
    }
}

/// Receives state after every ledger mutation
///
/// Called synchronously. An error is reported back to the ledger, which
/// logs it and keeps its in-memory state.
pub trait StateSink {
    fn persist(&mut self, snapshot: Snapshot<'_>) -> FintrackResult<()>;

    fn audit(&mut self, _entry: &AuditEntry) -> FintrackResult<()> {
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StateSink for NullSink {
    fn persist(&mut self, _snapshot: Snapshot<'_>) -> FintrackResult<()> {
        Ok(())
    }
}

impl<S: StateSink + ?Sized> StateSink for &mut S {
    fn persist(&mut self, snapshot: Snapshot<'_>) -> FintrackResult<()> {
        (**self).persist(snapshot)
    }

    fn audit(&mut self, entry: &AuditEntry) -> FintrackResult<()> {
        (**self).audit(entry)
    }
}
