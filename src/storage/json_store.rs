//! JSON file persistence
//!
//! One file per collection under `data/`, each wrapped in a named object
//! (`{"assets": [...]}`) so the files stay self-describing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::FintrackPaths;
use crate::error::FintrackResult;
use crate::models::{Asset, BudgetConfig, Category, Goal, Transaction};
use crate::services::accounts::AccountStore;
use crate::services::state::LedgerState;

use super::file_io::{read_json, write_json_atomic};
use super::{seed, Snapshot, StateSink};

#[derive(Serialize, Deserialize)]
struct AssetData {
    assets: Vec<Asset>,
}

#[derive(Serialize, Deserialize)]
struct GoalData {
    goals: Vec<Goal>,
}

#[derive(Serialize, Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

#[derive(Serialize, Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

pub struct JsonStore {
    paths: FintrackPaths,
    audit: AuditLogger,
}

impl JsonStore {
    pub fn new(paths: FintrackPaths) -> FintrackResult<Self> {
        paths.ensure_directories()?;
        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    pub fn audit_logger(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load the ledger state; any collection never saved comes from the seed
    ///
    /// Seeded collections are written straight back so their ids and dates
    /// stay fixed across runs.
    pub fn load(&mut self, today: NaiveDate) -> FintrackResult<LedgerState> {
        let assets = read_json::<AssetData, _>(self.paths.assets_file())?.map(|d| d.assets);
        let goals = read_json::<GoalData, _>(self.paths.goals_file())?.map(|d| d.goals);
        let transactions =
            read_json::<TransactionData, _>(self.paths.transactions_file())?.map(|d| d.transactions);
        let budget = read_json::<BudgetConfig, _>(self.paths.budget_file())?;
        let categories =
            read_json::<CategoryData, _>(self.paths.categories_file())?.map(|d| d.categories);

        let seeded = [
            assets.is_none(),
            goals.is_none(),
            transactions.is_none(),
            budget.is_none(),
            categories.is_none(),
        ];

        let state = LedgerState {
            accounts: AccountStore::new(
                assets.unwrap_or_else(seed::seed_assets),
                goals.unwrap_or_else(seed::seed_goals),
            ),
            transactions: transactions.unwrap_or_else(|| seed::seed_transactions(today)),
            budget: budget.unwrap_or_else(|| seed::seed_budget(today)),
            categories: categories.unwrap_or_else(crate::models::default_categories),
        };

        let snapshots = [
            Snapshot::Assets(state.accounts.assets()),
            Snapshot::Goals(state.accounts.goals()),
            Snapshot::Transactions(&state.transactions),
            Snapshot::Budget(&state.budget),
            Snapshot::Categories(&state.categories),
        ];
        for (snapshot, _) in snapshots.into_iter().zip(seeded).filter(|(_, s)| *s) {
            debug!(collection = snapshot.collection(), "writing seed data");
            self.persist(snapshot)?;
        }

        debug!(
            assets = state.accounts.assets().len(),
            goals = state.accounts.goals().len(),
            transactions = state.transactions.len(),
            "loaded ledger state"
        );
        Ok(state)
    }

    /// Write every collection of `state`
    pub fn save_all(&mut self, state: &LedgerState) -> FintrackResult<()> {
        self.persist(Snapshot::Assets(state.accounts.assets()))?;
        self.persist(Snapshot::Goals(state.accounts.goals()))?;
        self.persist(Snapshot::Transactions(&state.transactions))?;
        self.persist(Snapshot::Budget(&state.budget))?;
        self.persist(Snapshot::Categories(&state.categories))
    }
}

impl StateSink for JsonStore {
    fn persist(&mut self, snapshot: Snapshot<'_>) -> FintrackResult<()> {
        debug!(collection = snapshot.collection(), "persisting");
        match snapshot {
            Snapshot::Assets(assets) => write_json_atomic(
                self.paths.assets_file(),
                &AssetData {
                    assets: assets.to_vec(),
                },
            ),
            Snapshot::Goals(goals) => write_json_atomic(
                self.paths.goals_file(),
                &GoalData {
                    goals: goals.to_vec(),
                },
            ),
            Snapshot::Transactions(transactions) => write_json_atomic(
                self.paths.transactions_file(),
                &TransactionData {
                    transactions: transactions.to_vec(),
                },
            ),
            Snapshot::Budget(budget) => write_json_atomic(self.paths.budget_file(), budget),
            Snapshot::Categories(categories) => write_json_atomic(
                self.paths.categories_file(),
                &CategoryData {
                    categories: categories.to_vec(),
                },
            ),
        }
    }

    fn audit(&mut self, entry: &AuditEntry) -> FintrackResult<()> {
        self.audit.log(entry)
    }
}
