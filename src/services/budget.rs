//! Budget period tracker
//!
//! A read model over the transaction log. Nothing here is stored: every
//! figure is recomputed from the live log on each query, so the budget can
//! never drift from the ledger.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{percent_of, BudgetConfig, Money, Routing, Transaction, TransactionKind};

/// Computed state of the budget window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub config: BudgetConfig,
    /// All expenses dated inside the window, whatever their routing
    pub spent: Money,
    /// Income routed to the budget inside the window
    pub allocated_income: Money,
    pub effective_limit: Money,
    /// Negative when over budget
    pub remaining: Money,
    /// 0..=100
    pub percent_used: i64,
    pub is_over_budget: bool,
    pub days_remaining: i64,
}

pub struct BudgetTracker<'a> {
    config: &'a BudgetConfig,
    log: &'a [Transaction],
}

impl<'a> BudgetTracker<'a> {
    pub fn new(config: &'a BudgetConfig, log: &'a [Transaction]) -> Self {
        Self { config, log }
    }

    pub fn spent(&self) -> Money {
        self.in_window()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum()
    }

    pub fn allocated_income(&self) -> Money {
        self.in_window()
            .filter(|t| t.kind == TransactionKind::Income && t.routing == Routing::BudgetPeriod)
            .map(|t| t.amount)
            .sum()
    }

    /// Configured limit plus income allocated to the window
    pub fn effective_limit(&self) -> Money {
        self.config.limit + self.allocated_income()
    }

    /// Evaluate the budget as seen on `as_of`
    pub fn query(&self, as_of: NaiveDate) -> BudgetStatus {
        let spent = self.spent();
        let allocated_income = self.allocated_income();
        let effective_limit = self.effective_limit();

        BudgetStatus {
            config: *self.config,
            spent,
            allocated_income,
            effective_limit,
            remaining: effective_limit - spent,
            percent_used: percent_of(spent, effective_limit).clamp(0, 100),
            is_over_budget: spent > effective_limit,
            days_remaining: ((self.config.end_date - as_of).num_days() + 1).max(0),
        }
    }

    fn in_window(&self) -> impl Iterator<Item = &'a Transaction> + 'a {
        let window = self.config.window();
        self.log
            .iter()
            .filter(move |t| window.contains(t.occurred_on))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetId, GoalId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january(limit: i64) -> BudgetConfig {
        BudgetConfig::new(Money::from_major(limit), date(2024, 1, 1), date(2024, 1, 31))
    }

    #[test]
    fn test_spent_and_remaining() {
        let config = january(1_000_000);
        let log = vec![Transaction::expense(
            "Groceries",
            Money::from_major(300_000),
            "Food",
            date(2024, 1, 15),
        )];

        let status = BudgetTracker::new(&config, &log).query(date(2024, 1, 20));
        assert_eq!(status.spent, Money::from_major(300_000));
        assert_eq!(status.remaining, Money::from_major(700_000));
        assert_eq!(status.percent_used, 30);
        assert!(!status.is_over_budget);
        assert_eq!(status.days_remaining, 12);
    }

    #[test]
    fn test_budget_income_lifts_limit() {
        let config = january(1_000_000);
        let log = vec![
            Transaction::income("Bonus", Money::from_major(200_000), "Salary", date(2024, 1, 5))
                .routed_to(Routing::BudgetPeriod),
            // Unrouted and out-of-window income does not count
            Transaction::income("Gift", Money::from_major(50_000), "Gift", date(2024, 1, 6)),
            Transaction::income("Late", Money::from_major(70_000), "Salary", date(2024, 2, 1))
                .routed_to(Routing::BudgetPeriod),
        ];

        let tracker = BudgetTracker::new(&config, &log);
        let status = tracker.query(date(2024, 1, 10));
        assert_eq!(status.allocated_income, Money::from_major(200_000));
        assert_eq!(status.effective_limit, Money::from_major(1_200_000));
        assert_eq!(tracker.effective_limit(), status.effective_limit);
    }

    #[test]
    fn test_routed_expenses_still_count_as_spend() {
        let config = january(1_000);
        let log = vec![
            Transaction::expense("Top up", Money::from_major(100), "Asset Transfer", date(2024, 1, 2))
                .routed_to(Routing::Asset(AssetId::new())),
            Transaction::expense("Saving", Money::from_major(200), "Goal Savings", date(2024, 1, 3))
                .routed_to(Routing::Goal(GoalId::new())),
        ];
        assert_eq!(BudgetTracker::new(&config, &log).spent(), Money::from_major(300));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let config = january(1_000);
        let log = vec![
            Transaction::expense("a", Money::from_major(1), "Food", date(2023, 12, 31)),
            Transaction::expense("b", Money::from_major(2), "Food", date(2024, 1, 1)),
            Transaction::expense("c", Money::from_major(4), "Food", date(2024, 1, 31)),
            Transaction::expense("d", Money::from_major(8), "Food", date(2024, 2, 1)),
        ];
        assert_eq!(BudgetTracker::new(&config, &log).spent(), Money::from_major(6));
    }

    #[test]
    fn test_over_budget_clamps_percent() {
        let config = january(100);
        let log = vec![Transaction::expense("Big", Money::from_major(250), "Shopping", date(2024, 1, 3))];
        let status = BudgetTracker::new(&config, &log).query(date(2024, 2, 10));
        assert_eq!(status.percent_used, 100);
        assert_eq!(status.remaining, Money::from_major(-150));
        assert!(status.is_over_budget);
        assert_eq!(status.days_remaining, 0);
    }

    #[test]
    fn test_zero_limit_reports_zero_percent() {
        let config = january(0);
        let log = vec![Transaction::expense("Tea", Money::from_major(5), "Food", date(2024, 1, 3))];
        let status = BudgetTracker::new(&config, &log).query(date(2024, 1, 3));
        assert_eq!(status.effective_limit, Money::zero());
        assert_eq!(status.percent_used, 0);
        assert!(status.is_over_budget);
    }

    #[test]
    fn test_query_is_pure() {
        let config = january(1_000);
        let log = vec![Transaction::expense("Tea", Money::from_major(5), "Food", date(2024, 1, 3))];
        let tracker = BudgetTracker::new(&config, &log);
        assert_eq!(tracker.query(date(2024, 1, 4)), tracker.query(date(2024, 1, 4)));
        assert_eq!(log.len(), 1);
    }
}
