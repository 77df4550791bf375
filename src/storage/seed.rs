//! Built-in demo data
//!
//! Used for any collection that has never been saved, and by
//! `fintrack reset`.

use chrono::{Duration, NaiveDate, Utc};

use crate::models::{
    default_categories, Asset, AssetType, BudgetConfig, Goal, Money, Transaction,
    DEFAULT_BUDGET_LIMIT,
};
use crate::services::accounts::AccountStore;
use crate::services::state::LedgerState;

pub fn seed_assets() -> Vec<Asset> {
    let mut savings = Asset::new(
        "BCA Savings",
        AssetType::Cash,
        Money::from_major(45_000_000),
        seed_date(2023, 10, 1),
    );
    savings.icon = Some("💳".into());

    let mut stocks = Asset::new(
        "GoTo Stocks",
        AssetType::Stock,
        Money::from_major(12_000_000),
        seed_date(2023, 11, 1),
    );
    stocks.icon = Some("📈".into());

    vec![savings, stocks]
}

pub fn seed_goals() -> Vec<Goal> {
    let mut wedding = Goal::new("Wedding", Money::from_major(50_000_000))
        .with_current(Money::from_major(15_000_000))
        .with_deadline(seed_date(2025, 12, 31));
    wedding.icon = "💍".into();

    let mut house = Goal::new("New House", Money::from_major(500_000_000))
        .with_current(Money::from_major(45_000_000))
        .with_deadline(seed_date(2030, 1, 1));
    house.icon = "🏠".into();

    vec![wedding, house]
}

/// Two expenses dated `today`, the second logged a little earlier
pub fn seed_transactions(today: NaiveDate) -> Vec<Transaction> {
    let now = Utc::now();
    vec![
        Transaction::expense("Netflix", Money::from_major(186_000), "Entertainment", today)
            .with_icon("🎬")
            .logged_at(now),
        Transaction::expense("Kopi Kenangan", Money::from_major(25_000), "Food", today)
            .with_icon("☕")
            .logged_at(now - Duration::seconds(100)),
    ]
}

pub fn seed_budget(today: NaiveDate) -> BudgetConfig {
    BudgetConfig::for_month(DEFAULT_BUDGET_LIMIT, today)
}

pub fn seed_state(today: NaiveDate) -> LedgerState {
    LedgerState {
        accounts: AccountStore::new(seed_assets(), seed_goals()),
        transactions: seed_transactions(today),
        budget: seed_budget(today),
        categories: default_categories(),
    }
}

fn seed_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
