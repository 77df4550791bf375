//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_register, format_transaction_row};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    Routing, Transaction, TransactionKind, ASSET_TRANSFER_CATEGORY, GOAL_SAVINGS_CATEGORY,
};
use crate::services::{DateFilter, DestinationFilter, Ledger, TransactionFilter};
use crate::storage::StateSink;

use super::{date_or_today, parse_date, parse_money};

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        title: String,
        /// Amount (positive)
        amount: String,
        /// Record as income instead of an expense
        #[arg(short, long)]
        income: bool,
        /// Category; routed transactions default to the transfer categories
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Route to an asset (name or ID)
        #[arg(long, conflicts_with_all = ["goal", "budget"])]
        asset: Option<String>,
        /// Route to a goal (name or ID)
        #[arg(long, conflicts_with = "budget")]
        goal: Option<String>,
        /// Allocate income to the current budget period
        #[arg(long)]
        budget: bool,
    },
    /// List transactions, newest first
    List {
        /// Match title or category
        #[arg(short, long)]
        search: Option<String>,
        /// expense, portfolio or goals
        #[arg(long)]
        destination: Option<String>,
        /// A single day (YYYY-MM-DD)
        #[arg(long, conflicts_with_all = ["month", "from", "to"])]
        date: Option<String>,
        /// A calendar month (YYYY-MM)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        month: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show one transaction
    Show {
        /// Full or short ID
        id: String,
    },
    /// Remove a transaction and reverse its effect
    Void {
        /// Full or short ID
        id: String,
    },
}

pub fn handle_transaction_command<S: StateSink>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    cmd: TransactionCommands,
    today: NaiveDate,
) -> FintrackResult<()> {
    match cmd {
        TransactionCommands::Add {
            title,
            amount,
            income,
            category,
            date,
            icon,
            asset,
            goal,
            budget,
        } => {
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            let routing = resolve_routing(ledger, asset.as_deref(), goal.as_deref(), budget)?;
            if routing == Routing::BudgetPeriod && kind == TransactionKind::Expense {
                return Err(FintrackError::Validation(
                    "Only income can be allocated to the budget".into(),
                ));
            }

            let category = match (category, routing) {
                (Some(c), _) => c,
                (None, Routing::Asset(_)) => ASSET_TRANSFER_CATEGORY.to_string(),
                (None, Routing::Goal(_)) => GOAL_SAVINGS_CATEGORY.to_string(),
                (None, _) => {
                    return Err(FintrackError::Validation(
                        "A category is required (use --category)".into(),
                    ))
                }
            };
            // Fall back to the registered category's icon
            let icon = icon.or_else(|| {
                ledger
                    .categories()
                    .iter()
                    .find(|c| c.matches(&category))
                    .map(|c| c.icon.clone())
            });

            let date = date_or_today(date.as_deref(), today)?;
            let mut txn = Transaction::new(kind, title, parse_money(&amount, "amount")?, category, date)
                .routed_to(routing);
            txn.icon = icon;

            let recorded = ledger.record(txn)?;
            println!("Recorded: {}", format_transaction_row(&recorded, ledger.accounts(), settings));
            println!("  ID: {}", recorded.id);
        }

        TransactionCommands::List {
            search,
            destination,
            date,
            month,
            from,
            to,
            limit,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(search) = search {
                filter = filter.search(search);
            }
            if let Some(destination) = destination {
                let parsed = DestinationFilter::parse(&destination).ok_or_else(|| {
                    FintrackError::Validation(format!(
                        "Invalid destination '{}'. Valid: expense, portfolio, goals",
                        destination
                    ))
                })?;
                filter = filter.destination(parsed);
            }
            if let Some(date) = date {
                filter = filter.date(DateFilter::Day(parse_date(&date)?));
            } else if let Some(month) = month {
                filter = filter.date(DateFilter::parse_month(&month)?);
            } else if from.is_some() || to.is_some() {
                filter = filter.date(DateFilter::Range {
                    start: from.as_deref().map(parse_date).transpose()?,
                    end: to.as_deref().map(parse_date).transpose()?,
                });
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let hits = ledger.list_transactions(&filter);
            print!(
                "{}",
                format_transaction_register(&hits, ledger.accounts(), settings)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = ledger.find_transaction(&id)?;
            println!("{}", format_transaction_row(txn, ledger.accounts(), settings));
            println!("  ID:     {}", txn.id);
            println!("  Kind:   {}", txn.kind);
            println!("  Route:  {}", txn.routing);
            if let Some(logged_at) = txn.logged_at {
                println!("  Logged: {}", logged_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }

        TransactionCommands::Void { id } => {
            let id = ledger.find_transaction(&id)?.id;
            let voided = ledger.void(id)?;
            println!("Voided: {}", voided);
        }
    }

    Ok(())
}

fn resolve_routing<S: StateSink>(
    ledger: &Ledger<S>,
    asset: Option<&str>,
    goal: Option<&str>,
    budget: bool,
) -> FintrackResult<Routing> {
    if let Some(asset) = asset {
        let found = ledger
            .accounts()
            .find_asset(asset)
            .ok_or_else(|| FintrackError::asset_not_found(asset))?;
        return Ok(Routing::Asset(found.id));
    }
    if let Some(goal) = goal {
        let found = ledger
            .accounts()
            .find_goal(goal)
            .ok_or_else(|| FintrackError::goal_not_found(goal))?;
        return Ok(Routing::Goal(found.id));
    }
    Ok(if budget {
        Routing::BudgetPeriod
    } else {
        Routing::Unrouted
    })
}
