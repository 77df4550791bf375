//! Core data models for fintrack
//!
//! Transactions, the accounts they can be routed to (assets and goals), the
//! budget configuration and the category registry.

pub mod asset;
pub mod budget;
pub mod category;
pub mod goal;
pub mod history;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use asset::{Asset, AssetType, RecurringContribution};
pub use budget::{BudgetConfig, DEFAULT_BUDGET_LIMIT};
pub use category::{
    default_categories, Category, ASSET_TRANSFER_CATEGORY, GOAL_SAVINGS_CATEGORY,
};
pub use goal::{DeadlineStatus, Goal};
pub use history::{HistoryEntry, HistoryLabel};
pub use ids::{AssetId, GoalId, TransactionId};
pub use money::{percent_of, Money};
pub use period::DateRange;
pub use transaction::{
    AccountRef, Routing, Transaction, TransactionKind, MAX_TRANSACTION_AMOUNT,
};
