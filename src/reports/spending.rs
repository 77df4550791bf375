//! Spending analytics
//!
//! Category breakdowns and period-over-period comparisons, both read
//! straight off the transaction log. Only expenses count as spending.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{percent_of, DateRange, Money, Transaction};

use super::window::ReportWindow;

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of the window's total spending, 0..=100
    pub percentage: i64,
}

/// Expenses grouped by category, largest first
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub window: ReportWindow,
    pub range: DateRange,
    pub rows: Vec<CategoryTotal>,
    pub total: Money,
}

impl CategoryBreakdown {
    pub fn generate(log: &[Transaction], window: ReportWindow, today: NaiveDate) -> Self {
        let range = window.current(today);
        let rows = group_expenses(log, range);
        let total = rows.iter().map(|r| r.total).sum();
        Self {
            window,
            range,
            rows,
            total,
        }
    }

    pub fn format_terminal(&self) -> String {
        let mut output = format!("Spending by category ({}: {})\n", self.window, self.range);
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>14} {:>6} {:>6}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for row in &self.rows {
            output.push_str(&format!(
                "{:<30} {:>14} {:>6} {:>5}%\n",
                row.category, row.total, row.transaction_count, row.percentage
            ));
        }
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>14}\n", "TOTAL", self.total));
        output
    }
}

/// Sum of expense amounts dated inside `range`
pub fn expense_total(log: &[Transaction], range: DateRange) -> Money {
    log.iter()
        .filter(|t| t.is_expense() && range.contains(t.occurred_on))
        .map(|t| t.amount)
        .sum()
}

fn group_expenses(log: &[Transaction], range: DateRange) -> Vec<CategoryTotal> {
    let mut rows: Vec<CategoryTotal> = Vec::new();
    for txn in log
        .iter()
        .filter(|t| t.is_expense() && range.contains(t.occurred_on))
    {
        match rows.iter_mut().find(|r| r.category == txn.category) {
            Some(row) => {
                row.total += txn.amount;
                row.transaction_count += 1;
            }
            None => rows.push(CategoryTotal {
                category: txn.category.clone(),
                total: txn.amount,
                transaction_count: 1,
                percentage: 0,
            }),
        }
    }

    // Stable: equal totals keep first-seen order
    rows.sort_by(|a, b| b.total.cmp(&a.total));

    let total: Money = rows.iter().map(|r| r.total).sum();
    for row in &mut rows {
        row.percentage = percent_of(row.total, total);
    }
    rows
}

/// Current window's spending against the preceding one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodComparison {
    pub window: ReportWindow,
    pub current_range: DateRange,
    pub previous_range: DateRange,
    pub current_total: Money,
    pub previous_total: Money,
    /// Rounded half-up; zero when there was no previous spending
    pub percent_change: i64,
}

impl PeriodComparison {
    pub fn generate(log: &[Transaction], window: ReportWindow, today: NaiveDate) -> Self {
        let current_range = window.current(today);
        let previous_range = window.previous(today);
        let current_total = expense_total(log, current_range);
        let previous_total = expense_total(log, previous_range);

        Self {
            window,
            current_range,
            previous_range,
            current_total,
            previous_total,
            percent_change: percent_of(current_total - previous_total, previous_total),
        }
    }

    pub fn format_terminal(&self) -> String {
        let direction = match self.percent_change {
            p if p > 0 => "more",
            p if p < 0 => "less",
            _ => "same",
        };
        format!(
            "{} comparison\n  Current  ({}): {}\n  Previous ({}): {}\n  Change: {}% ({})\n",
            self.window,
            self.current_range,
            self.current_total,
            self.previous_range,
            self.previous_total,
            self.percent_change,
            direction
        )
    }
}
