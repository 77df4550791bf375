//! Transaction model
//!
//! A transaction is an immutable record of money moving in or out. Its
//! direction is carried by [`TransactionKind`]; the amount is always a
//! positive magnitude.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AssetId, GoalId, TransactionId};
use super::money::Money;

/// Largest amount a single transaction may carry (one trillion units)
pub const MAX_TRANSACTION_AMOUNT: Money = Money::from_major(1_000_000_000_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "out" => Some(Self::Expense),
            "income" | "in" => Some(Self::Income),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// Where a transaction's effect lands beyond plain budget accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum Routing {
    #[default]
    Unrouted,
    Asset(AssetId),
    Goal(GoalId),
    BudgetPeriod,
}

impl Routing {
    /// The account whose balance this routing moves, if any
    pub fn account(&self) -> Option<AccountRef> {
        match self {
            Self::Asset(id) => Some(AccountRef::Asset(*id)),
            Self::Goal(id) => Some(AccountRef::Goal(*id)),
            Self::Unrouted | Self::BudgetPeriod => None,
        }
    }
}

impl fmt::Display for Routing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrouted => write!(f, "-"),
            Self::Asset(id) => write!(f, "asset {}", id.short()),
            Self::Goal(id) => write!(f, "goal {}", id.short()),
            Self::BudgetPeriod => write!(f, "budget"),
        }
    }
}

impl From<AccountRef> for Routing {
    fn from(account: AccountRef) -> Self {
        match account {
            AccountRef::Asset(id) => Self::Asset(id),
            AccountRef::Goal(id) => Self::Goal(id),
        }
    }
}

/// A key into the account store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountRef {
    Asset(AssetId),
    Goal(GoalId),
}

impl AccountRef {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Asset(_) => "Asset",
            Self::Goal(_) => "Goal",
        }
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset(id) => write!(f, "{}", id),
            Self::Goal(id) => write!(f, "{}", id),
        }
    }
}

/// A financial event in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(default)]
    pub title: String,

    /// Positive magnitude
    pub amount: Money,

    pub kind: TransactionKind,

    pub category: String,

    #[serde(rename = "date")]
    pub occurred_on: NaiveDate,

    /// Only used to order entries within a day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub routing: Routing,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        title: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        occurred_on: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            title: title.into(),
            amount,
            kind,
            category: category.into(),
            occurred_on,
            logged_at: Some(Utc::now()),
            icon: None,
            routing: Routing::Unrouted,
        }
    }

    pub fn expense(
        title: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        occurred_on: NaiveDate,
    ) -> Self {
        Self::new(TransactionKind::Expense, title, amount, category, occurred_on)
    }

    pub fn income(
        title: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        occurred_on: NaiveDate,
    ) -> Self {
        Self::new(TransactionKind::Income, title, amount, category, occurred_on)
    }

    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    pub fn routed_to(mut self, routing: Routing) -> Self {
        self.routing = routing;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn logged_at(mut self, at: DateTime<Utc>) -> Self {
        self.logged_at = Some(at);
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Amount with direction applied: income adds, expense subtracts
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_TRANSACTION_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income() { "+" } else { "-" };
        write!(
            f,
            "{} {} [{}] {}{}",
            self.occurred_on.format("%Y-%m-%d"),
            self.title,
            self.category,
            sign,
            self.amount
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Money),
    #[error("Amount {0} exceeds the maximum of 1000000000000.00")]
    AmountTooLarge(Money),
    #[error("Category is required")]
    MissingCategory,
}
