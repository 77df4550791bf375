//! Transaction listing filters

use chrono::{Datelike, NaiveDate};
use std::cmp::Reverse;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Routing, Transaction};

/// Which kind of destination a listed transaction must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationFilter {
    /// Unrouted or routed to the budget
    Expense,
    /// Routed to an asset
    Portfolio,
    /// Routed to a goal
    Goals,
}

impl DestinationFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "expenses" | "budget" => Some(Self::Expense),
            "portfolio" | "asset" | "assets" => Some(Self::Portfolio),
            "goal" | "goals" => Some(Self::Goals),
            _ => None,
        }
    }

    pub fn matches(&self, routing: &Routing) -> bool {
        match self {
            Self::Expense => matches!(routing, Routing::Unrouted | Routing::BudgetPeriod),
            Self::Portfolio => matches!(routing, Routing::Asset(_)),
            Self::Goals => matches!(routing, Routing::Goal(_)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    /// Inclusive; either bound may be open
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateFilter {
    /// Parse a `YYYY-MM` month
    pub fn parse_month(s: &str) -> FintrackResult<Self> {
        let parsed = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| FintrackError::Validation(format!("Invalid month '{}', expected YYYY-MM", s)))?;
        Ok(Self::Month {
            year: parsed.year(),
            month: parsed.month(),
        })
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Day(day) => date == day,
            Self::Month { year, month } => date.year() == year && date.month() == month,
            Self::Range { start, end } => {
                start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
            }
        }
    }
}

/// Builder-style filter over the transaction log
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    search: Option<String>,
    destination: Option<DestinationFilter>,
    date: Option<DateFilter>,
    limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring of title or category
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into().trim().to_lowercase();
        self.search = if text.is_empty() { None } else { Some(text) };
        self
    }

    pub fn destination(mut self, destination: DestinationFilter) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn date(mut self, date: DateFilter) -> Self {
        self.date = Some(date);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(needle) = &self.search {
            let hit = txn.title.to_lowercase().contains(needle)
                || txn.category.to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }
        if let Some(destination) = &self.destination {
            if !destination.matches(&txn.routing) {
                return false;
            }
        }
        if let Some(date) = &self.date {
            if !date.matches(txn.occurred_on) {
                return false;
            }
        }
        true
    }

    /// Matching transactions, newest first
    pub fn apply<'a>(&self, log: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut hits: Vec<&Transaction> = log.iter().filter(|t| self.matches(t)).collect();
        hits.sort_by_key(|t| Reverse((t.occurred_on, t.logged_at)));
        if let Some(limit) = self.limit {
            hits.truncate(limit);
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetId, GoalId, Money};
    use chrono::{Duration, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_log() -> Vec<Transaction> {
        let now = Utc::now();
        vec![
            Transaction::expense("Netflix", Money::from_major(186_000), "Entertainment", date(2024, 3, 5))
                .logged_at(now),
            Transaction::expense("Kopi Kenangan", Money::from_major(25_000), "Food", date(2024, 3, 5))
                .logged_at(now - Duration::seconds(100)),
            Transaction::income("Top up", Money::from_major(1_000), "Asset Transfer", date(2024, 2, 20))
                .routed_to(Routing::Asset(AssetId::new())),
            Transaction::income("Save", Money::from_major(500), "Goal Savings", date(2024, 1, 10))
                .routed_to(Routing::Goal(GoalId::new())),
            Transaction::income("Bonus", Money::from_major(700), "Salary", date(2024, 3, 1))
                .routed_to(Routing::BudgetPeriod),
        ]
    }

    fn titles(hits: &[&Transaction]) -> Vec<String> {
        hits.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_newest_first_with_same_day_by_logged_at() {
        let log = sample_log();
        let hits = TransactionFilter::new().apply(&log);
        assert_eq!(
            titles(&hits),
            vec!["Netflix", "Kopi Kenangan", "Bonus", "Top up", "Save"]
        );
    }

    #[test]
    fn test_search_matches_title_or_category() {
        let log = sample_log();
        assert_eq!(titles(&TransactionFilter::new().search("KOPI").apply(&log)), vec!["Kopi Kenangan"]);
        assert_eq!(titles(&TransactionFilter::new().search("entertain").apply(&log)), vec!["Netflix"]);
        assert_eq!(TransactionFilter::new().search("  ").apply(&log).len(), 5);
    }

    #[test]
    fn test_destination_filters() {
        let log = sample_log();
        let expense = TransactionFilter::new().destination(DestinationFilter::Expense);
        assert_eq!(titles(&expense.apply(&log)), vec!["Netflix", "Kopi Kenangan", "Bonus"]);

        let portfolio = TransactionFilter::new().destination(DestinationFilter::Portfolio);
        assert_eq!(titles(&portfolio.apply(&log)), vec!["Top up"]);

        let goals = TransactionFilter::new().destination(DestinationFilter::Goals);
        assert_eq!(titles(&goals.apply(&log)), vec!["Save"]);
    }

    #[test]
    fn test_date_filters() {
        let log = sample_log();
        let day = TransactionFilter::new().date(DateFilter::Day(date(2024, 3, 5)));
        assert_eq!(day.apply(&log).len(), 2);

        let month = TransactionFilter::new().date(DateFilter::parse_month("2024-02").unwrap());
        assert_eq!(titles(&month.apply(&log)), vec!["Top up"]);

        let open_start = TransactionFilter::new().date(DateFilter::Range {
            start: None,
            end: Some(date(2024, 2, 20)),
        });
        assert_eq!(titles(&open_start.apply(&log)), vec!["Top up", "Save"]);

        let open_end = TransactionFilter::new().date(DateFilter::Range {
            start: Some(date(2024, 3, 1)),
            end: None,
        });
        assert_eq!(open_end.apply(&log).len(), 3);
    }

    #[test]
    fn test_combined_and_limit() {
        let log = sample_log();
        let hits = TransactionFilter::new()
            .destination(DestinationFilter::Expense)
            .date(DateFilter::Day(date(2024, 3, 5)))
            .limit(1)
            .apply(&log);
        assert_eq!(titles(&hits), vec!["Netflix"]);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(DestinationFilter::parse("Goals"), Some(DestinationFilter::Goals));
        assert_eq!(DestinationFilter::parse("nope"), None);
        assert!(DateFilter::parse_month("2024-13").is_err());
    }
}
