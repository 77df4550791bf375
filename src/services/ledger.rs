//! Ledger engine
//!
//! The append/void pipeline for transactions. Recording a routed
//! transaction applies its effect to the account store; voiding applies the
//! exact inverse and removes the record. Every mutation is handed to the
//! [`StateSink`] once it has fully succeeded in memory.
//!
//! Effects by routing:
//!
//! | kind    | destination | effect                   | history        |
//! |---------|-------------|--------------------------|----------------|
//! | Income  | Asset       | balance += amount        | new balance, Top Up |
//! | Income  | Goal        | current += amount        | amount, Deposit |
//! | Expense | Asset       | balance -= amount        | new balance, Withdraw |
//! | Expense | Goal        | current -= amount        | amount, Withdraw |
//! | any     | budget/none | none (budget reads the log) | none        |
//!
//! Voiding reverses the balance only. History lines already written stay.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    AccountRef, Asset, AssetId, AssetType, BudgetConfig, Category, DeadlineStatus, Goal, GoalId,
    HistoryLabel, Money, RecurringContribution, Transaction, TransactionId,
    TransactionKind, DEFAULT_BUDGET_LIMIT,
};
use crate::reports::{CategoryBreakdown, PeriodComparison, ReportWindow};
use crate::storage::{seed, Snapshot, StateSink};

use super::accounts::AccountStore;
use super::budget::{BudgetStatus, BudgetTracker};
use super::filter::TransactionFilter;
use super::state::LedgerState;

/// Progress of a savings goal as of a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    pub current: Money,
    pub target: Money,
    /// 0..=100
    pub percent: i64,
    pub deadline_status: Option<DeadlineStatus>,
}

/// Editable asset fields; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct AssetUpdate {
    pub name: Option<String>,
    pub asset_type: Option<AssetType>,
    pub custom_type: Option<String>,
    pub icon: Option<String>,
    /// `Some(None)` removes the recurring contribution
    pub recurring: Option<Option<RecurringContribution>>,
}

/// Editable goal fields; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target: Option<Money>,
    /// `Some(None)` removes the deadline
    pub deadline: Option<Option<NaiveDate>>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Collection {
    Assets,
    Goals,
    Transactions,
    Budget,
    Categories,
}

const ALL_COLLECTIONS: [Collection; 5] = [
    Collection::Assets,
    Collection::Goals,
    Collection::Transactions,
    Collection::Budget,
    Collection::Categories,
];

pub struct Ledger<S: StateSink> {
    state: LedgerState,
    sink: S,
    default_budget_limit: Money,
}

impl<S: StateSink> Ledger<S> {
    pub fn new(state: LedgerState, sink: S) -> Self {
        Self {
            state,
            sink,
            default_budget_limit: DEFAULT_BUDGET_LIMIT,
        }
    }

    /// Limit used by [`clear`](Self::clear) and [`reset_to_seed`](Self::reset_to_seed)
    pub fn with_default_budget_limit(mut self, limit: Money) -> Self {
        self.default_budget_limit = limit;
        self
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.state.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn budget(&self) -> &BudgetConfig {
        &self.state.budget
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (LedgerState, S) {
        (self.state, self.sink)
    }

    // ---------------------------------------------------------------
    // Transactions
    // ---------------------------------------------------------------

    /// Append a transaction and apply its routed effect
    ///
    /// Checks run before anything is touched, in this order: amount and
    /// category, id uniqueness, routing target. A rejected transaction
    /// leaves the log and every account exactly as they were.
    pub fn record(&mut self, txn: Transaction) -> FintrackResult<Transaction> {
        txn.validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        if self.state.transactions.iter().any(|t| t.id == txn.id) {
            return Err(FintrackError::Duplicate {
                entity_type: "Transaction",
                identifier: txn.id.to_string(),
            });
        }

        let account = txn.routing.account();
        if let Some(account) = account {
            if !self.state.accounts.contains(account) {
                return Err(FintrackError::RoutingTargetNotFound {
                    kind: account.kind_name(),
                    id: account.to_string(),
                });
            }
            let label = history_label(txn.kind, account);
            self.state
                .accounts
                .apply_delta(account, txn.signed_amount(), txn.occurred_on, Some(label))?;
        }

        self.state.transactions.push(txn.clone());
        debug!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, routing = %txn.routing, "recorded transaction");

        self.sync(&[Collection::Transactions]);
        if let Some(account) = account {
            self.sync(&[collection_of(account)]);
        }
        self.audit(AuditEntry::create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.title.clone()),
            &txn,
        ));

        Ok(txn)
    }

    /// Remove a transaction, reversing its routed effect
    ///
    /// If the account it was routed to has since been deleted the reversal
    /// is skipped and the record is still removed.
    pub fn void(&mut self, id: TransactionId) -> FintrackResult<Transaction> {
        let index = self
            .state
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FintrackError::transaction_not_found(id.to_string()))?;

        let txn = &self.state.transactions[index];
        let account = txn.routing.account();
        let mut reversed = None;
        if let Some(account) = account {
            if self.state.accounts.contains(account) {
                self.state
                    .accounts
                    .apply_delta(account, -txn.signed_amount(), txn.occurred_on, None)?;
                reversed = Some(account);
            } else {
                warn!(
                    id = %txn.id,
                    %account,
                    "routing target no longer exists; skipping balance reversal"
                );
            }
        }

        let txn = self.state.transactions.remove(index);
        debug!(id = %txn.id, "voided transaction");

        self.sync(&[Collection::Transactions]);
        if let Some(account) = reversed {
            self.sync(&[collection_of(account)]);
        }
        self.audit(AuditEntry::delete(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.title.clone()),
            &txn,
        ));

        Ok(txn)
    }

    /// Resolve a full or short transaction id
    pub fn find_transaction(&self, identifier: &str) -> FintrackResult<&Transaction> {
        let mut hits = self
            .state
            .transactions
            .iter()
            .filter(|t| t.id.matches(identifier));
        match (hits.next(), hits.next()) {
            (Some(txn), None) => Ok(txn),
            (Some(_), Some(_)) => Err(FintrackError::Validation(format!(
                "'{}' matches more than one transaction; use the full id",
                identifier
            ))),
            (None, _) => Err(FintrackError::transaction_not_found(identifier)),
        }
    }

    pub fn list_transactions(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        filter.apply(&self.state.transactions)
    }

    // ---------------------------------------------------------------
    // Accounts
    // ---------------------------------------------------------------

    pub fn create_asset(&mut self, asset: Asset) -> FintrackResult<AssetId> {
        let id = asset.id;
        let name = asset.name.clone();
        self.state.accounts.insert_asset(asset)?;
        info!(%id, name = %name, "created asset");

        self.sync(&[Collection::Assets]);
        if let Some(asset) = self.state.accounts.get_asset(id) {
            let entry = AuditEntry::create(EntityType::Asset, id.to_string(), Some(name), asset);
            self.audit(entry);
        }
        Ok(id)
    }

    /// Edit descriptive fields; the balance is only moved by transactions
    pub fn update_asset(&mut self, id: AssetId, update: AssetUpdate) -> FintrackResult<Asset> {
        let before = self
            .state
            .accounts
            .get_asset(id)
            .cloned()
            .ok_or_else(|| FintrackError::asset_not_found(id.to_string()))?;

        let mut after = before.clone();
        if let Some(name) = update.name {
            after.name = name.trim().to_string();
        }
        if let Some(asset_type) = update.asset_type {
            after.asset_type = asset_type;
        }
        if let Some(custom_type) = update.custom_type {
            after.custom_type = Some(custom_type);
        }
        if let Some(icon) = update.icon {
            after.icon = Some(icon);
        }
        if let Some(recurring) = update.recurring {
            after.recurring = recurring;
        }
        after
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        if let Some(slot) = self.state.accounts.asset_mut(id) {
            *slot = after.clone();
        }

        self.sync(&[Collection::Assets]);
        self.audit(AuditEntry::update(
            EntityType::Asset,
            id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        ));
        Ok(after)
    }

    /// Delete an asset; transactions routed to it keep their routing
    pub fn delete_asset(&mut self, id: AssetId) -> FintrackResult<Asset> {
        let asset = self.state.accounts.remove_asset(id)?;
        let dangling = self.routed_count(AccountRef::Asset(id));
        if dangling > 0 {
            warn!(%id, dangling, "deleted asset still has routed transactions");
        }

        self.sync(&[Collection::Assets]);
        self.audit(AuditEntry::delete(
            EntityType::Asset,
            id.to_string(),
            Some(asset.name.clone()),
            &asset,
        ));
        Ok(asset)
    }

    pub fn create_goal(&mut self, goal: Goal) -> FintrackResult<GoalId> {
        let id = goal.id;
        let name = goal.name.clone();
        self.state.accounts.insert_goal(goal)?;
        info!(%id, name = %name, "created goal");

        self.sync(&[Collection::Goals]);
        if let Some(goal) = self.state.accounts.get_goal(id) {
            let entry = AuditEntry::create(EntityType::Goal, id.to_string(), Some(name), goal);
            self.audit(entry);
        }
        Ok(id)
    }

    /// Edit descriptive fields and target; `current` is only moved by transactions
    pub fn update_goal(&mut self, id: GoalId, update: GoalUpdate) -> FintrackResult<Goal> {
        let before = self
            .state
            .accounts
            .get_goal(id)
            .cloned()
            .ok_or_else(|| FintrackError::goal_not_found(id.to_string()))?;

        let mut after = before.clone();
        if let Some(name) = update.name {
            after.name = name.trim().to_string();
        }
        if let Some(target) = update.target {
            after.target = target;
        }
        if let Some(deadline) = update.deadline {
            after.deadline = deadline;
        }
        if let Some(icon) = update.icon {
            after.icon = icon;
        }
        after
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        if let Some(slot) = self.state.accounts.goal_mut(id) {
            *slot = after.clone();
        }

        self.sync(&[Collection::Goals]);
        self.audit(AuditEntry::update(
            EntityType::Goal,
            id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        ));
        Ok(after)
    }

    /// Delete a goal; transactions routed to it keep their routing
    pub fn delete_goal(&mut self, id: GoalId) -> FintrackResult<Goal> {
        let goal = self.state.accounts.remove_goal(id)?;
        let dangling = self.routed_count(AccountRef::Goal(id));
        if dangling > 0 {
            warn!(%id, dangling, "deleted goal still has routed transactions");
        }

        self.sync(&[Collection::Goals]);
        self.audit(AuditEntry::delete(
            EntityType::Goal,
            id.to_string(),
            Some(goal.name.clone()),
            &goal,
        ));
        Ok(goal)
    }

    // ---------------------------------------------------------------
    // Budget and categories
    // ---------------------------------------------------------------

    pub fn update_budget(&mut self, config: BudgetConfig) -> FintrackResult<BudgetConfig> {
        config
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        let before = std::mem::replace(&mut self.state.budget, config);
        self.sync(&[Collection::Budget]);
        self.audit(AuditEntry::update(
            EntityType::Budget,
            "budget",
            None,
            &before,
            &config,
        ));
        Ok(config)
    }

    /// Register a category; names are unique ignoring case
    pub fn add_category(&mut self, category: Category) -> FintrackResult<()> {
        category
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;
        if self.state.categories.iter().any(|c| c.matches(&category.name)) {
            return Err(FintrackError::Duplicate {
                entity_type: "Category",
                identifier: category.name,
            });
        }

        let category = Category {
            name: category.name.trim().to_string(),
            ..category
        };
        self.audit(AuditEntry::create(
            EntityType::Category,
            category.name.clone(),
            Some(category.name.clone()),
            &category,
        ));
        self.state.categories.push(category);
        self.sync(&[Collection::Categories]);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Whole-state operations
    // ---------------------------------------------------------------

    /// Replace everything with the built-in demo data
    pub fn reset_to_seed(&mut self, today: NaiveDate) {
        let mut state = seed::seed_state(today);
        state.budget = BudgetConfig::for_month(self.default_budget_limit, today);
        self.state = state;
        info!("ledger reset to demo data");

        self.sync(&ALL_COLLECTIONS);
        self.audit(AuditEntry::reset("restored demo data"));
    }

    /// Remove all accounts and transactions, restore default budget and categories
    pub fn clear(&mut self, today: NaiveDate) {
        self.state = LedgerState::empty(today, self.default_budget_limit);
        info!("ledger cleared");

        self.sync(&ALL_COLLECTIONS);
        self.audit(AuditEntry::reset("cleared all data"));
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn asset_balance(&self, id: AssetId) -> FintrackResult<Money> {
        self.state
            .accounts
            .get_asset(id)
            .map(|a| a.balance)
            .ok_or_else(|| FintrackError::asset_not_found(id.to_string()))
    }

    pub fn goal_progress(&self, id: GoalId, today: NaiveDate) -> FintrackResult<GoalProgress> {
        let goal = self
            .state
            .accounts
            .get_goal(id)
            .ok_or_else(|| FintrackError::goal_not_found(id.to_string()))?;
        Ok(GoalProgress {
            current: goal.current,
            target: goal.target,
            percent: goal.percent_complete(),
            deadline_status: goal.deadline_status(today),
        })
    }

    pub fn net_worth(&self) -> Money {
        self.state.accounts.net_worth()
    }

    pub fn query_budget(&self, as_of: NaiveDate) -> BudgetStatus {
        BudgetTracker::new(&self.state.budget, &self.state.transactions).query(as_of)
    }

    pub fn breakdown_by_category(&self, window: ReportWindow, today: NaiveDate) -> CategoryBreakdown {
        CategoryBreakdown::generate(&self.state.transactions, window, today)
    }

    pub fn period_comparison(&self, window: ReportWindow, today: NaiveDate) -> PeriodComparison {
        PeriodComparison::generate(&self.state.transactions, window, today)
    }

    // ---------------------------------------------------------------

    fn routed_count(&self, account: AccountRef) -> usize {
        self.state
            .transactions
            .iter()
            .filter(|t| t.routing.account() == Some(account))
            .count()
    }

    /// Hand collections to the sink; failures are logged, state is kept
    fn sync(&mut self, collections: &[Collection]) {
        let Self { state, sink, .. } = self;
        for collection in collections {
            let snapshot = match collection {
                Collection::Assets => Snapshot::Assets(state.accounts.assets()),
                Collection::Goals => Snapshot::Goals(state.accounts.goals()),
                Collection::Transactions => Snapshot::Transactions(&state.transactions),
                Collection::Budget => Snapshot::Budget(&state.budget),
                Collection::Categories => Snapshot::Categories(&state.categories),
            };
            if let Err(e) = sink.persist(snapshot) {
                warn!(collection = snapshot.collection(), error = %e, "failed to persist state");
            }
        }
    }

    fn audit(&mut self, entry: AuditEntry) {
        if let Err(e) = self.sink.audit(&entry) {
            warn!(error = %e, "failed to write audit entry");
        }
    }
}

fn history_label(kind: TransactionKind, account: AccountRef) -> HistoryLabel {
    match (kind, account) {
        (TransactionKind::Income, AccountRef::Asset(_)) => HistoryLabel::TopUp,
        (TransactionKind::Income, AccountRef::Goal(_)) => HistoryLabel::Deposit,
        (TransactionKind::Expense, _) => HistoryLabel::Withdraw,
    }
}

fn collection_of(account: AccountRef) -> Collection {
    match account {
        AccountRef::Asset(_) => Collection::Assets,
        AccountRef::Goal(_) => Collection::Goals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{HistoryEntry, Routing, GOAL_SAVINGS_CATEGORY};
    use crate::services::filter::DestinationFilter;
    use crate::storage::NullSink;

    /// Records what the ledger handed over; can be told to fail
    #[derive(Default)]
    struct RecordingSink {
        persisted: Vec<&'static str>,
        audited: Vec<(Operation, EntityType)>,
        fail: bool,
    }

    impl StateSink for RecordingSink {
        fn persist(&mut self, snapshot: Snapshot<'_>) -> FintrackResult<()> {
            if self.fail {
                return Err(FintrackError::Storage("disk full".into()));
            }
            self.persisted.push(snapshot.collection());
            Ok(())
        }

        fn audit(&mut self, entry: &AuditEntry) -> FintrackResult<()> {
            self.audited.push((entry.operation, entry.entity_type));
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 1, 20)
    }

    fn empty_ledger() -> Ledger<RecordingSink> {
        let state = LedgerState::empty(today(), Money::from_major(1_000_000));
        Ledger::new(state, RecordingSink::default())
    }

    fn ledger_with_wallet() -> (Ledger<RecordingSink>, AssetId) {
        let mut ledger = empty_ledger();
        let wallet = Asset::new("Wallet", AssetType::Cash, Money::from_major(100), date(2024, 1, 1));
        let id = ledger.create_asset(wallet).unwrap();
        (ledger, id)
    }

    fn ledger_with_goal() -> (Ledger<RecordingSink>, GoalId) {
        let mut ledger = empty_ledger();
        let goal = Goal::new("Wedding", Money::from_major(50_000_000))
            .with_current(Money::from_major(15_000_000));
        let id = ledger.create_goal(goal).unwrap();
        (ledger, id)
    }

    #[test]
    fn test_asset_top_up_and_void() {
        let (mut ledger, wallet) = ledger_with_wallet();
        let txn = Transaction::income("Salary", Money::from_major(50), "Salary", today())
            .routed_to(Routing::Asset(wallet));

        let recorded = ledger.record(txn).unwrap();
        assert_eq!(ledger.asset_balance(wallet).unwrap(), Money::from_major(150));
        let history = &ledger.accounts().get_asset(wallet).unwrap().history;
        assert_eq!(
            history.last(),
            Some(&HistoryEntry::new(today(), Money::from_major(150), HistoryLabel::TopUp))
        );

        ledger.void(recorded.id).unwrap();
        assert_eq!(ledger.asset_balance(wallet).unwrap(), Money::from_major(100));
        // History is not rewritten on void
        assert_eq!(ledger.accounts().get_asset(wallet).unwrap().history.len(), 2);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_asset_withdraw_records_resulting_balance() {
        let (mut ledger, wallet) = ledger_with_wallet();
        ledger
            .record(
                Transaction::expense("Rent", Money::from_major(30), "Bills", today())
                    .routed_to(Routing::Asset(wallet)),
            )
            .unwrap();
        let last = ledger.accounts().get_asset(wallet).unwrap().history.last().cloned();
        assert_eq!(
            last,
            Some(HistoryEntry::new(today(), Money::from_major(70), HistoryLabel::Withdraw))
        );
    }

    #[test]
    fn test_budget_spend() {
        let mut ledger = empty_ledger();
        ledger
            .update_budget(BudgetConfig::new(
                Money::from_major(1_000_000),
                date(2024, 1, 1),
                date(2024, 1, 31),
            ))
            .unwrap();
        ledger
            .record(Transaction::expense("Groceries", Money::from_major(300_000), "Food", date(2024, 1, 15)))
            .unwrap();

        let status = ledger.query_budget(today());
        assert_eq!(status.spent, Money::from_major(300_000));
        assert_eq!(status.remaining, Money::from_major(700_000));
        assert_eq!(status.percent_used, 30);
    }

    #[test]
    fn test_budget_allocation_and_void() {
        let mut ledger = empty_ledger();
        let before = ledger.query_budget(today()).effective_limit;

        let txn = ledger
            .record(
                Transaction::income("Bonus", Money::from_major(200_000), "Salary", date(2024, 1, 10))
                    .routed_to(Routing::BudgetPeriod),
            )
            .unwrap();
        assert_eq!(ledger.query_budget(today()).effective_limit, Money::from_major(1_200_000));

        ledger.void(txn.id).unwrap();
        assert_eq!(ledger.query_budget(today()).effective_limit, before);
    }

    #[test]
    fn test_goal_withdraw_records_delta() {
        let (mut ledger, goal) = ledger_with_goal();
        ledger
            .record(
                Transaction::expense("Dip in", Money::from_major(5_000_000), GOAL_SAVINGS_CATEGORY, today())
                    .routed_to(Routing::Goal(goal)),
            )
            .unwrap();

        let progress = ledger.goal_progress(goal, today()).unwrap();
        assert_eq!(progress.current, Money::from_major(10_000_000));
        assert_eq!(progress.percent, 20);
        let history = &ledger.accounts().get_goal(goal).unwrap().history;
        assert_eq!(
            history.last(),
            Some(&HistoryEntry::new(today(), Money::from_major(5_000_000), HistoryLabel::Withdraw))
        );
    }

    #[test]
    fn test_goal_deposit() {
        let (mut ledger, goal) = ledger_with_goal();
        ledger
            .record(
                Transaction::income("Save", Money::from_major(1_000_000), GOAL_SAVINGS_CATEGORY, today())
                    .routed_to(Routing::Goal(goal)),
            )
            .unwrap();
        let g = ledger.accounts().get_goal(goal).unwrap();
        assert_eq!(g.current, Money::from_major(16_000_000));
        assert_eq!(g.history[0].label, HistoryLabel::Deposit);
        assert_eq!(g.history[0].amount, Money::from_major(1_000_000));
    }

    #[test]
    fn test_breakdown_through_ledger() {
        let mut ledger = empty_ledger();
        ledger
            .record(Transaction::expense("Kopi", Money::from_major(25_000), "Food", today()))
            .unwrap();
        ledger
            .record(Transaction::expense("Netflix", Money::from_major(186_000), "Entertainment", today()))
            .unwrap();

        let breakdown = ledger.breakdown_by_category(ReportWindow::Month, today());
        let rows: Vec<_> = breakdown
            .rows
            .iter()
            .map(|r| (r.category.as_str(), r.total))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Entertainment", Money::from_major(186_000)),
                ("Food", Money::from_major(25_000)),
            ]
        );
    }

    #[test]
    fn test_void_unknown_id_is_not_found_and_changes_nothing() {
        let (mut ledger, wallet) = ledger_with_wallet();
        ledger
            .record(Transaction::expense("Tea", Money::from_major(5), "Food", today()))
            .unwrap();
        let before = ledger.state().clone();
        let persisted = ledger.sink().persisted.len();

        let err = ledger.void(TransactionId::new()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ledger.state(), &before);
        assert_eq!(ledger.asset_balance(wallet).unwrap(), Money::from_major(100));
        assert_eq!(ledger.sink().persisted.len(), persisted);
    }

    #[test]
    fn test_validation_rejects_before_mutation() {
        let (mut ledger, wallet) = ledger_with_wallet();
        let zero = Transaction::expense("Nothing", Money::zero(), "Food", today())
            .routed_to(Routing::Asset(wallet));
        assert!(ledger.record(zero).unwrap_err().is_validation());

        let no_category = Transaction::expense("Mystery", Money::from_major(1), "  ", today());
        assert!(ledger.record(no_category).unwrap_err().is_validation());

        assert!(ledger.transactions().is_empty());
        assert_eq!(ledger.asset_balance(wallet).unwrap(), Money::from_major(100));
    }

    #[test]
    fn test_missing_routing_target_rolls_back() {
        let (mut ledger, wallet) = ledger_with_wallet();
        let before = ledger.state().clone();

        let err = ledger
            .record(
                Transaction::income("Ghost", Money::from_major(10), "Gift", today())
                    .routed_to(Routing::Goal(GoalId::new())),
            )
            .unwrap_err();

        assert!(err.is_routing_target_not_found());
        assert_eq!(ledger.state(), &before);
        assert_eq!(ledger.asset_balance(wallet).unwrap(), Money::from_major(100));
    }

    #[test]
    fn test_out_of_range_amounts_are_rejected_atomically() {
        let (mut ledger, wallet) = ledger_with_wallet();

        let huge = Money::parse("92233720368547758.00").unwrap();
        let err = ledger
            .record(
                Transaction::income("Lottery", huge, "Gift", today())
                    .routed_to(Routing::Asset(wallet)),
            )
            .unwrap_err();
        assert!(err.is_validation());

        // Within the per-transaction bound, but the balance itself would overflow
        let rich = Asset::new("Vault", AssetType::Gold, Money::from_minor(i64::MAX - 10), today());
        let vault = ledger.create_asset(rich).unwrap();
        let err = ledger
            .record(
                Transaction::income("Bonus", Money::from_major(1), "Gift", today())
                    .routed_to(Routing::Asset(vault)),
            )
            .unwrap_err();
        assert!(err.is_validation());

        assert!(ledger.transactions().is_empty());
        assert_eq!(ledger.asset_balance(wallet).unwrap(), Money::from_major(100));
        assert_eq!(ledger.asset_balance(vault).unwrap(), Money::from_minor(i64::MAX - 10));
        assert_eq!(ledger.accounts().get_asset(vault).unwrap().history.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut ledger = empty_ledger();
        let txn = Transaction::expense("Tea", Money::from_major(5), "Food", today());
        ledger.record(txn.clone()).unwrap();
        assert!(matches!(
            ledger.record(txn),
            Err(FintrackError::Duplicate { .. })
        ));
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn test_void_with_deleted_account_still_removes_record() {
        let (mut ledger, wallet) = ledger_with_wallet();
        let txn = ledger
            .record(
                Transaction::income("Salary", Money::from_major(50), "Salary", today())
                    .routed_to(Routing::Asset(wallet)),
            )
            .unwrap();
        ledger.delete_asset(wallet).unwrap();
        // Routing survives account deletion
        assert_eq!(ledger.transactions()[0].routing, Routing::Asset(wallet));

        let removed = ledger.void(txn.id).unwrap();
        assert_eq!(removed.id, txn.id);
        assert!(ledger.transactions().is_empty());
        assert!(ledger.asset_balance(wallet).unwrap_err().is_not_found());
    }

    #[test]
    fn test_balance_matches_live_transactions() {
        let (mut ledger, wallet) = ledger_with_wallet();
        let opening = Money::from_major(100);
        let mut ids = Vec::new();

        for (i, major) in [40, 15, 70, 5, 120, 33].iter().enumerate() {
            let amount = Money::from_major(*major);
            let txn = if i % 2 == 0 {
                Transaction::income("in", amount, "Salary", today())
            } else {
                Transaction::expense("out", amount, "Bills", today())
            };
            ids.push(ledger.record(txn.routed_to(Routing::Asset(wallet))).unwrap().id);
        }
        ledger.void(ids[1]).unwrap();
        ledger.void(ids[4]).unwrap();

        let live: Money = ledger
            .transactions()
            .iter()
            .filter(|t| t.routing == Routing::Asset(wallet))
            .map(|t| t.signed_amount())
            .sum();
        assert_eq!(ledger.asset_balance(wallet).unwrap(), opening + live);
        assert_eq!(ledger.asset_balance(wallet).unwrap(), Money::from_major(172));
    }

    #[test]
    fn test_sink_sees_affected_collections_and_audit() {
        let (mut ledger, wallet) = ledger_with_wallet();
        ledger.sink.persisted.clear();

        ledger
            .record(
                Transaction::expense("Fee", Money::from_major(1), "Bills", today())
                    .routed_to(Routing::Asset(wallet)),
            )
            .unwrap();
        assert_eq!(ledger.sink().persisted, vec!["transactions", "assets"]);
        assert_eq!(
            ledger.sink().audited.last(),
            Some(&(Operation::Create, EntityType::Transaction))
        );
    }

    #[test]
    fn test_sink_failure_keeps_memory_state() {
        let mut ledger = empty_ledger();
        ledger.sink.fail = true;

        ledger
            .record(Transaction::expense("Tea", Money::from_major(5), "Food", today()))
            .unwrap();
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn test_update_asset_keeps_balance() {
        let (mut ledger, wallet) = ledger_with_wallet();
        let updated = ledger
            .update_asset(
                wallet,
                AssetUpdate {
                    name: Some("Purse".into()),
                    recurring: Some(Some(RecurringContribution {
                        amount: Money::from_major(10),
                        day_of_month: 25,
                    })),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Purse");
        assert_eq!(updated.balance, Money::from_major(100));

        let bad = AssetUpdate {
            name: Some(" ".into()),
            ..Default::default()
        };
        assert!(ledger.update_asset(wallet, bad).unwrap_err().is_validation());
        assert_eq!(ledger.accounts().get_asset(wallet).unwrap().name, "Purse");
    }

    #[test]
    fn test_update_goal_and_progress() {
        let (mut ledger, goal) = ledger_with_goal();
        ledger
            .update_goal(
                goal,
                GoalUpdate {
                    target: Some(Money::from_major(30_000_000)),
                    deadline: Some(Some(date(2024, 1, 30))),
                    ..Default::default()
                },
            )
            .unwrap();

        let progress = ledger.goal_progress(goal, today()).unwrap();
        assert_eq!(progress.percent, 50);
        assert_eq!(progress.deadline_status, Some(DeadlineStatus::DaysLeft(10)));

        let zero_target = GoalUpdate {
            target: Some(Money::zero()),
            ..Default::default()
        };
        assert!(ledger.update_goal(goal, zero_target).unwrap_err().is_validation());
    }

    #[test]
    fn test_update_budget_validation() {
        let mut ledger = empty_ledger();
        let inverted = BudgetConfig::new(Money::from_major(1), date(2024, 2, 1), date(2024, 1, 1));
        assert!(ledger.update_budget(inverted).unwrap_err().is_validation());

        let negative = BudgetConfig::new(Money::from_major(-1), date(2024, 1, 1), date(2024, 1, 31));
        assert!(ledger.update_budget(negative).unwrap_err().is_validation());
    }

    #[test]
    fn test_add_category_is_case_insensitive_unique() {
        let mut ledger = empty_ledger();
        ledger.add_category(Category::custom("Pets", "🐶")).unwrap();
        assert!(matches!(
            ledger.add_category(Category::custom("food", "🥗")),
            Err(FintrackError::Duplicate { .. })
        ));
        assert_eq!(ledger.categories().len(), 7);
        assert!(ledger.categories().last().unwrap().is_custom);
    }

    #[test]
    fn test_reset_and_clear() {
        let mut ledger = Ledger::new(LedgerState::empty(today(), Money::zero()), NullSink);

        ledger.reset_to_seed(today());
        assert_eq!(ledger.accounts().assets().len(), 2);
        assert_eq!(ledger.transactions().len(), 2);
        assert_eq!(ledger.net_worth(), Money::from_major(57_000_000));

        ledger.clear(today());
        assert!(ledger.accounts().assets().is_empty());
        assert!(ledger.accounts().goals().is_empty());
        assert!(ledger.transactions().is_empty());
        assert_eq!(ledger.budget().limit, DEFAULT_BUDGET_LIMIT);
        assert_eq!(ledger.categories().len(), 6);
    }

    #[test]
    fn test_find_and_list_transactions() {
        let (mut ledger, wallet) = ledger_with_wallet();
        let routed = ledger
            .record(
                Transaction::income("Salary", Money::from_major(50), "Salary", today())
                    .routed_to(Routing::Asset(wallet)),
            )
            .unwrap();
        ledger
            .record(Transaction::expense("Tea", Money::from_major(5), "Food", today()))
            .unwrap();

        assert_eq!(ledger.find_transaction(&routed.id.short()).unwrap().id, routed.id);
        assert!(ledger.find_transaction("txn-nothing").unwrap_err().is_not_found());

        let portfolio = TransactionFilter::new().destination(DestinationFilter::Portfolio);
        let hits = ledger.list_transactions(&portfolio);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, routed.id);
    }

    #[test]
    fn test_comparison_through_ledger() {
        let mut ledger = empty_ledger();
        ledger
            .record(Transaction::expense("Tea", Money::from_major(5), "Food", date(2024, 1, 18)))
            .unwrap();
        let cmp = ledger.period_comparison(ReportWindow::Week, today());
        assert_eq!(cmp.current_total, Money::from_major(5));
        assert_eq!(cmp.percent_change, 0);
    }
}
