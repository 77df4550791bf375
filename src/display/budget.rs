//! Budget status display

use crate::config::Settings;
use crate::services::BudgetStatus;

pub fn format_budget_status(status: &BudgetStatus, settings: &Settings) -> String {
    let config = &status.config;
    let money = |m| settings.format_money(m);

    let mut output = format!(
        "Budget {} to {}\n",
        config.start_date.format(&settings.date_format),
        config.end_date.format(&settings.date_format)
    );
    output.push_str(&"=".repeat(44));
    output.push('\n');
    output.push_str(&format!("  {:<18} {:>22}\n", "Limit", money(config.limit)));
    if !status.allocated_income.is_zero() {
        output.push_str(&format!(
            "  {:<18} {:>22}\n",
            "+ Allocated income",
            money(status.allocated_income)
        ));
        output.push_str(&format!(
            "  {:<18} {:>22}\n",
            "Effective limit",
            money(status.effective_limit)
        ));
    }
    output.push_str(&format!("  {:<18} {:>22}\n", "Spent", money(status.spent)));
    output.push_str(&format!("  {:<18} {:>22}\n", "Remaining", money(status.remaining)));
    output.push_str(&format!("  {:<18} {:>21}%\n", "Used", status.percent_used));
    output.push_str(&format!("  {:<18} {:>22}\n", "Days remaining", status.days_remaining));
    if status.is_over_budget {
        output.push_str("\n  OVER BUDGET\n");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetConfig, Money, Transaction};
    use crate::services::BudgetTracker;
    use chrono::NaiveDate;

    #[test]
    fn test_over_budget_banner() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let config = BudgetConfig::for_month(Money::from_major(10), start);
        let log = vec![Transaction::expense("Big", Money::from_major(20), "Shopping", start)];
        let status = BudgetTracker::new(&config, &log).query(start);

        let output = format_budget_status(&status, &Settings::default());
        assert!(output.contains("OVER BUDGET"));
        assert!(output.contains("-Rp10.00"));
        assert!(!output.contains("Allocated"));
    }
}
