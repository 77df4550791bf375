//! Transaction display formatting

use crate::config::Settings;
use crate::models::{Routing, Transaction};
use crate::services::AccountStore;

/// Destination column: the routed account's name when it still exists
pub fn routing_label(routing: &Routing, accounts: &AccountStore) -> String {
    match routing {
        Routing::Unrouted => String::new(),
        Routing::BudgetPeriod => "→ Budget".to_string(),
        Routing::Asset(id) => match accounts.get_asset(*id) {
            Some(asset) => format!("→ {}", asset.name),
            None => "→ (deleted asset)".to_string(),
        },
        Routing::Goal(id) => match accounts.get_goal(*id) {
            Some(goal) => format!("→ {}", goal.name),
            None => "→ (deleted goal)".to_string(),
        },
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

pub fn format_transaction_row(
    txn: &Transaction,
    accounts: &AccountStore,
    settings: &Settings,
) -> String {
    let sign = if txn.is_income() { "+" } else { "-" };
    format!(
        "{:<12} {} {:<2} {:<22} {:<14} {:>18}  {}",
        txn.id.short(),
        txn.occurred_on.format(&settings.date_format),
        txn.icon.as_deref().unwrap_or(""),
        truncate(&txn.title, 22),
        truncate(&txn.category, 14),
        format!("{}{}", sign, settings.format_money(txn.amount)),
        routing_label(&txn.routing, accounts),
    )
}

/// Register view, already sorted by the caller
pub fn format_transaction_register(
    transactions: &[&Transaction],
    accounts: &AccountStore,
    settings: &Settings,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = format!(
        "{:<12} {:<10} {:<2} {:<22} {:<14} {:>18}  {}\n",
        "ID", "Date", "", "Title", "Category", "Amount", "Destination"
    );
    output.push_str(&"-".repeat(96));
    output.push('\n');
    for txn in transactions {
        output.push_str(&format_transaction_row(txn, accounts, settings));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, AssetId, AssetType, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_register_shows_destination_names() {
        let opened = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let wallet = Asset::new("Wallet", AssetType::Cash, Money::zero(), opened);
        let wallet_id = wallet.id;
        let accounts = AccountStore::new(vec![wallet], Vec::new());
        let settings = Settings::default();

        let routed = Transaction::income("Salary", Money::from_major(10), "Salary", opened)
            .routed_to(Routing::Asset(wallet_id));
        let dangling = Transaction::expense("Old", Money::from_major(1), "Bills", opened)
            .routed_to(Routing::Asset(AssetId::new()));

        let output = format_transaction_register(&[&routed, &dangling], &accounts, &settings);
        assert!(output.contains("→ Wallet"));
        assert!(output.contains("(deleted asset)"));
        assert!(output.contains("+Rp10.00"));
        assert_eq!(
            format_transaction_register(&[], &accounts, &settings),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Kopi Kenangan", 6), "Kopi …");
        assert_eq!(truncate("☕☕☕", 5), "☕☕☕");
    }
}
