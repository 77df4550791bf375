//! Service layer for fintrack
//!
//! The account store, the budget read model, transaction filtering and the
//! ledger engine that ties them together.

pub mod accounts;
pub mod budget;
pub mod filter;
pub mod ledger;
pub mod state;

pub use accounts::AccountStore;
pub use budget::{BudgetStatus, BudgetTracker};
pub use filter::{DateFilter, DestinationFilter, TransactionFilter};
pub use ledger::{AssetUpdate, GoalProgress, GoalUpdate, Ledger};
pub use state::LedgerState;
