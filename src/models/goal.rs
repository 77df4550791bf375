//! Savings goal model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::history::HistoryEntry;
use super::ids::GoalId;
use super::money::{percent_of, Money};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    pub name: String,

    pub target: Money,

    pub current: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,

    #[serde(default = "default_goal_icon")]
    pub icon: String,

    /// Deltas, not running balances
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

fn default_goal_icon() -> String {
    "🎯".to_string()
}

impl Goal {
    pub fn new(name: impl Into<String>, target: Money) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target,
            current: Money::zero(),
            deadline: None,
            icon: default_goal_icon(),
            history: Vec::new(),
        }
    }

    pub fn with_current(mut self, current: Money) -> Self {
        self.current = current;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Progress toward the target, 0..=100
    pub fn percent_complete(&self) -> i64 {
        percent_of(self.current, self.target).clamp(0, 100)
    }

    pub fn deadline_status(&self, today: NaiveDate) -> Option<DeadlineStatus> {
        let deadline = self.deadline?;
        let days = (deadline - today).num_days();
        Some(match days {
            d if d < 0 => DeadlineStatus::Overdue,
            0 => DeadlineStatus::DueToday,
            d => DeadlineStatus::DaysLeft(d),
        })
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target));
        }
        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} / {}", self.name, self.current, self.target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    Overdue,
    DueToday,
    DaysLeft(i64),
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue => write!(f, "Overdue"),
            Self::DueToday => write!(f, "Due Today"),
            Self::DaysLeft(days) => write!(f, "{} days left", days),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GoalValidationError {
    #[error("Goal name cannot be empty")]
    EmptyName,
    #[error("Goal target must be positive, got {0}")]
    NonPositiveTarget(Money),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_percent_complete_is_clamped() {
        let goal = Goal::new("Wedding", Money::from_major(50_000_000))
            .with_current(Money::from_major(15_000_000));
        assert_eq!(goal.percent_complete(), 30);

        let over = goal.clone().with_current(Money::from_major(60_000_000));
        assert_eq!(over.percent_complete(), 100);

        let under = goal.with_current(Money::from_major(-1_000_000));
        assert_eq!(under.percent_complete(), 0);
    }

    #[test]
    fn test_deadline_status() {
        let today = date(2025, 6, 1);
        let goal = Goal::new("House", Money::from_major(10));
        assert_eq!(goal.deadline_status(today), None);

        let goal = goal.with_deadline(date(2025, 6, 11));
        assert_eq!(goal.deadline_status(today), Some(DeadlineStatus::DaysLeft(10)));
        assert_eq!(goal.deadline_status(date(2025, 6, 11)), Some(DeadlineStatus::DueToday));
        assert_eq!(goal.deadline_status(date(2025, 7, 1)), Some(DeadlineStatus::Overdue));
        assert_eq!(DeadlineStatus::DaysLeft(3).to_string(), "3 days left");
    }

    #[test]
    fn test_validation() {
        assert!(Goal::new("Trip", Money::from_major(1)).validate().is_ok());
        assert_eq!(
            Goal::new("", Money::from_major(1)).validate(),
            Err(GoalValidationError::EmptyName)
        );
        assert!(matches!(
            Goal::new("Trip", Money::zero()).validate(),
            Err(GoalValidationError::NonPositiveTarget(_))
        ));
    }
}
