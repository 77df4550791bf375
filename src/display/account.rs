//! Asset and goal display formatting

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::{Asset, Goal, Money};

fn column_width<'a>(values: impl Iterator<Item = &'a str>, min: usize) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(min).max(min)
}

/// Table of assets with a net worth total
pub fn format_asset_list(assets: &[Asset], settings: &Settings) -> String {
    if assets.is_empty() {
        return "No assets found.\n".to_string();
    }

    let name_width = column_width(assets.iter().map(|a| a.name.as_str()), 4);
    let mut output = format!(
        "{:<2} {:<name_width$}  {:<10}  {:>18}  {}\n",
        "",
        "Name",
        "Type",
        "Balance",
        "ID",
        name_width = name_width,
    );
    output.push_str(&"-".repeat(name_width + 50));
    output.push('\n');

    for asset in assets {
        output.push_str(&format!(
            "{:<2} {:<name_width$}  {:<10}  {:>18}  {}\n",
            asset.icon(),
            asset.name,
            asset.type_label(),
            settings.format_money(asset.balance),
            asset.id.short(),
            name_width = name_width,
        ));
    }

    let total: Money = assets.iter().map(|a| a.balance).sum();
    output.push_str(&"-".repeat(name_width + 50));
    output.push('\n');
    output.push_str(&format!(
        "{:<2} {:<name_width$}  {:<10}  {:>18}\n",
        "",
        "NET WORTH",
        "",
        settings.format_money(total),
        name_width = name_width,
    ));
    output
}

/// One asset with its full history
pub fn format_asset_details(asset: &Asset, settings: &Settings) -> String {
    let mut output = format!("{} {}\n", asset.icon(), asset.name);
    output.push_str(&format!("  Type:     {}\n", asset.type_label()));
    output.push_str(&format!("  ID:       {}\n", asset.id));
    output.push_str(&format!("  Balance:  {}\n", settings.format_money(asset.balance)));
    if let Some(recurring) = &asset.recurring {
        output.push_str(&format!(
            "  Recurring: {} on day {}\n",
            settings.format_money(recurring.amount),
            recurring.day_of_month
        ));
    }

    output.push_str("\n  History:\n");
    if asset.history.is_empty() {
        output.push_str("    (none)\n");
    }
    for entry in &asset.history {
        output.push_str(&format!(
            "    {}  {:<9} {:>18}\n",
            entry.date.format(&settings.date_format),
            entry.label,
            settings.format_money(entry.amount)
        ));
    }
    output
}

fn progress_bar(percent: i64) -> String {
    let filled = (percent.clamp(0, 100) / 10) as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}

/// Table of goals with progress bars
pub fn format_goal_list(goals: &[Goal], today: NaiveDate, settings: &Settings) -> String {
    if goals.is_empty() {
        return "No goals found.\n".to_string();
    }

    let name_width = column_width(goals.iter().map(|g| g.name.as_str()), 4);
    let mut output = String::new();
    for goal in goals {
        let deadline = goal
            .deadline_status(today)
            .map(|s| s.to_string())
            .unwrap_or_default();
        output.push_str(&format!(
            "{:<2} {:<name_width$}  {} {:>3}%  {} / {}  {}  {}\n",
            goal.icon,
            goal.name,
            progress_bar(goal.percent_complete()),
            goal.percent_complete(),
            settings.format_money(goal.current),
            settings.format_money(goal.target),
            deadline,
            goal.id.short(),
            name_width = name_width,
        ));
    }
    output
}

/// One goal with its deposit and withdrawal history
pub fn format_goal_details(goal: &Goal, today: NaiveDate, settings: &Settings) -> String {
    let mut output = format!("{} {}\n", goal.icon, goal.name);
    output.push_str(&format!("  ID:       {}\n", goal.id));
    output.push_str(&format!(
        "  Progress: {} {}% ({} of {})\n",
        progress_bar(goal.percent_complete()),
        goal.percent_complete(),
        settings.format_money(goal.current),
        settings.format_money(goal.target)
    ));
    if let (Some(deadline), Some(status)) = (goal.deadline, goal.deadline_status(today)) {
        output.push_str(&format!(
            "  Deadline: {} ({})\n",
            deadline.format(&settings.date_format),
            status
        ));
    }

    output.push_str("\n  History:\n");
    if goal.history.is_empty() {
        output.push_str("    (none)\n");
    }
    for entry in &goal.history {
        output.push_str(&format!(
            "    {}  {:<9} {:>18}\n",
            entry.date.format(&settings.date_format),
            entry.label,
            settings.format_money(entry.amount)
        ));
    }
    output
}
