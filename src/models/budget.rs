//! Budget configuration
//!
//! The configured spending limit and its date window. Spending figures are
//! never stored here; see `services::budget` for the derived view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::period::DateRange;

/// Limit applied when nothing else is configured
pub const DEFAULT_BUDGET_LIMIT: Money = Money::from_major(5_000_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    pub limit: Money,
    pub start_date: NaiveDate,
    /// Inclusive through end of day
    pub end_date: NaiveDate,
}

impl BudgetConfig {
    pub fn new(limit: Money, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            limit,
            start_date,
            end_date,
        }
    }

    /// A budget covering the calendar month that contains `today`
    pub fn for_month(limit: Money, today: NaiveDate) -> Self {
        let month = DateRange::month_of(today);
        Self::new(limit, month.start, month.end)
    }

    pub fn window(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit(self.limit));
        }
        if self.start_date > self.end_date {
            return Err(BudgetValidationError::InvertedWindow {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}

impl fmt::Display for BudgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} over {}", self.limit, self.window())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BudgetValidationError {
    #[error("Budget limit cannot be negative, got {0}")]
    NegativeLimit(Money),
    #[error("Budget starts ({start}) after it ends ({end})")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },
}
