//! The full in-memory ledger state
//!
//! Loaded once by a persistence collaborator and handed to
//! [`Ledger`](super::ledger::Ledger), which owns it from then on.

use chrono::NaiveDate;

use crate::models::{default_categories, BudgetConfig, Category, Money, Transaction};

use super::accounts::AccountStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    pub accounts: AccountStore,
    /// Append order; listing applies its own ordering
    pub transactions: Vec<Transaction>,
    pub budget: BudgetConfig,
    pub categories: Vec<Category>,
}

impl LedgerState {
    /// No accounts or transactions, default categories, a monthly budget
    pub fn empty(today: NaiveDate, budget_limit: Money) -> Self {
        Self {
            accounts: AccountStore::default(),
            transactions: Vec::new(),
            budget: BudgetConfig::for_month(budget_limit, today),
            categories: default_categories(),
        }
    }
}
