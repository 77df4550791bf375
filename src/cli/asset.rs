//! Asset CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_asset_details, format_asset_list};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Asset, AssetId, AssetType, RecurringContribution, Routing, Transaction, ASSET_TRANSFER_CATEGORY};
use crate::services::{AssetUpdate, Ledger};
use crate::storage::StateSink;

use super::{date_or_today, parse_money};

#[derive(Subcommand)]
pub enum AssetCommands {
    /// Create a new asset
    Create {
        /// Asset name
        name: String,
        /// Asset type (cash, stock, crypto, gold, other)
        #[arg(short = 't', long, default_value = "cash")]
        asset_type: String,
        /// Label shown instead of "Other"
        #[arg(long)]
        custom_type: Option<String>,
        /// Opening balance
        #[arg(short, long, default_value = "0")]
        balance: String,
        #[arg(long)]
        icon: Option<String>,
    },
    /// List all assets with net worth
    List,
    /// Show an asset and its history
    Show {
        /// Asset name or ID
        asset: String,
    },
    /// Edit an asset
    Edit {
        /// Asset name or ID
        asset: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 't', long)]
        asset_type: Option<String>,
        #[arg(long)]
        custom_type: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Monthly contribution amount
        #[arg(long, requires = "recurring_day")]
        recurring_amount: Option<String>,
        /// Day of month for the contribution (1-31)
        #[arg(long, requires = "recurring_amount")]
        recurring_day: Option<u32>,
        /// Remove the recurring contribution
        #[arg(long, conflicts_with = "recurring_amount")]
        no_recurring: bool,
    },
    /// Delete an asset; transactions routed to it are kept
    Delete {
        /// Asset name or ID
        asset: String,
    },
    /// Move money into an asset
    TopUp {
        asset: String,
        amount: String,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Take money out of an asset
    Withdraw {
        asset: String,
        amount: String,
        #[arg(short, long)]
        date: Option<String>,
    },
}

fn resolve_asset<S: StateSink>(ledger: &Ledger<S>, identifier: &str) -> FintrackResult<AssetId> {
    ledger
        .accounts()
        .find_asset(identifier)
        .map(|a| a.id)
        .ok_or_else(|| FintrackError::asset_not_found(identifier))
}

fn parse_asset_type(input: &str) -> FintrackResult<AssetType> {
    AssetType::parse(input).ok_or_else(|| {
        FintrackError::Validation(format!(
            "Invalid asset type: '{}'. Valid types: cash, stock, crypto, gold, other",
            input
        ))
    })
}

pub fn handle_asset_command<S: StateSink>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    cmd: AssetCommands,
    today: NaiveDate,
) -> FintrackResult<()> {
    match cmd {
        AssetCommands::Create {
            name,
            asset_type,
            custom_type,
            balance,
            icon,
        } => {
            let asset_type = parse_asset_type(&asset_type)?;
            let balance = parse_money(&balance, "balance")?;

            let mut asset = Asset::new(name, asset_type, balance, today);
            asset.custom_type = custom_type;
            asset.icon = icon;
            let id = ledger.create_asset(asset)?;

            if let Some(asset) = ledger.accounts().get_asset(id) {
                println!("Created asset: {} {}", asset.icon(), asset.name);
                println!("  Type: {}", asset.type_label());
                println!("  Balance: {}", settings.format_money(asset.balance));
                println!("  ID: {}", asset.id);
            }
        }

        AssetCommands::List => {
            print!("{}", format_asset_list(ledger.accounts().assets(), settings));
        }

        AssetCommands::Show { asset } => {
            let id = resolve_asset(ledger, &asset)?;
            if let Some(asset) = ledger.accounts().get_asset(id) {
                print!("{}", format_asset_details(asset, settings));
            }
        }

        AssetCommands::Edit {
            asset,
            name,
            asset_type,
            custom_type,
            icon,
            recurring_amount,
            recurring_day,
            no_recurring,
        } => {
            let id = resolve_asset(ledger, &asset)?;

            let recurring = match (recurring_amount, recurring_day) {
                (Some(amount), Some(day_of_month)) => Some(Some(RecurringContribution {
                    amount: parse_money(&amount, "recurring amount")?,
                    day_of_month,
                })),
                _ if no_recurring => Some(None),
                _ => None,
            };
            let update = AssetUpdate {
                name,
                asset_type: asset_type.as_deref().map(parse_asset_type).transpose()?,
                custom_type,
                icon,
                recurring,
            };

            let updated = ledger.update_asset(id, update)?;
            println!("Updated asset: {} {}", updated.icon(), updated.name);
        }

        AssetCommands::Delete { asset } => {
            let id = resolve_asset(ledger, &asset)?;
            let deleted = ledger.delete_asset(id)?;
            println!("Deleted asset: {}", deleted.name);
        }

        AssetCommands::TopUp { asset, amount, date } => {
            let id = resolve_asset(ledger, &asset)?;
            let amount = parse_money(&amount, "amount")?;
            let date = date_or_today(date.as_deref(), today)?;

            let txn = Transaction::income("Top up", amount, ASSET_TRANSFER_CATEGORY, date)
                .routed_to(Routing::Asset(id));
            ledger.record(txn)?;
            let balance = ledger.asset_balance(id)?;
            println!("New balance: {}", settings.format_money(balance));
        }

        AssetCommands::Withdraw { asset, amount, date } => {
            let id = resolve_asset(ledger, &asset)?;
            let amount = parse_money(&amount, "amount")?;
            let date = date_or_today(date.as_deref(), today)?;

            let txn = Transaction::expense("Withdraw", amount, ASSET_TRANSFER_CATEGORY, date)
                .routed_to(Routing::Asset(id));
            ledger.record(txn)?;
            let balance = ledger.asset_balance(id)?;
            println!("New balance: {}", settings.format_money(balance));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::LedgerState;
    use crate::storage::NullSink;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn empty_ledger() -> Ledger<NullSink> {
        Ledger::new(LedgerState::empty(today(), Money::from_major(1_000)), NullSink)
    }

    #[test]
    fn test_create_then_top_up_by_name() {
        let mut ledger = empty_ledger();
        let settings = Settings::default();
        handle_asset_command(
            &mut ledger,
            &settings,
            AssetCommands::Create {
                name: "Wallet".into(),
                asset_type: "cash".into(),
                custom_type: None,
                balance: "100".into(),
                icon: None,
            },
            today(),
        )
        .unwrap();
        handle_asset_command(
            &mut ledger,
            &settings,
            AssetCommands::TopUp {
                asset: "wallet".into(),
                amount: "50".into(),
                date: None,
            },
            today(),
        )
        .unwrap();

        let wallet = ledger.accounts().find_asset("Wallet").unwrap();
        assert_eq!(wallet.balance, Money::from_major(150));
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.transactions()[0].category, ASSET_TRANSFER_CATEGORY);
    }

    #[test]
    fn test_unknown_type_and_asset() {
        let mut ledger = empty_ledger();
        let settings = Settings::default();
        let err = handle_asset_command(
            &mut ledger,
            &settings,
            AssetCommands::Create {
                name: "Bonds".into(),
                asset_type: "bonds".into(),
                custom_type: None,
                balance: "0".into(),
                icon: None,
            },
            today(),
        )
        .unwrap_err();
        assert!(err.is_validation());

        let err = handle_asset_command(
            &mut ledger,
            &settings,
            AssetCommands::Delete { asset: "Nope".into() },
            today(),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
