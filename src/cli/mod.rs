//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger. Handlers are generic over
//! the state sink so they can be driven against an in-memory ledger in tests.

pub mod asset;
pub mod audit;
pub mod budget;
pub mod category;
pub mod goal;
pub mod report;
pub mod transaction;

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::Money;

pub use asset::{handle_asset_command, AssetCommands};
pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

pub(crate) fn parse_money(input: &str, what: &str) -> FintrackResult<Money> {
    Money::parse(input).map_err(|e| {
        FintrackError::Validation(format!(
            "Invalid {} '{}'. Use a format like '25000' or '25000.50'. Error: {}",
            what, input, e
        ))
    })
}

pub(crate) fn parse_date(input: &str) -> FintrackResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FintrackError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", input))
    })
}

/// `--date` when given, otherwise today
pub(crate) fn date_or_today(input: Option<&str>, today: NaiveDate) -> FintrackResult<NaiveDate> {
    input.map_or(Ok(today), parse_date)
}
