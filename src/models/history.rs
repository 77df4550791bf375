//! Per-account history log
//!
//! Asset entries record the balance *after* the change while goal entries
//! record the change itself. Reports built on top of the history depend on
//! that difference, so it is kept as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// What kind of movement produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryLabel {
    Initial,
    #[serde(rename = "Top Up")]
    TopUp,
    Deposit,
    Withdraw,
}

impl fmt::Display for HistoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "Initial"),
            Self::TopUp => write!(f, "Top Up"),
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdraw => write!(f, "Withdraw"),
        }
    }
}

/// One append-only line in an account's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(rename = "type")]
    pub label: HistoryLabel,
}

impl HistoryEntry {
    pub fn new(date: NaiveDate, amount: Money, label: HistoryLabel) -> Self {
        Self {
            date,
            amount,
            label,
        }
    }
}
