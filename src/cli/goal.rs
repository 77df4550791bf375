//! Goal CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_goal_details, format_goal_list};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Goal, GoalId, Routing, Transaction, GOAL_SAVINGS_CATEGORY};
use crate::services::{GoalUpdate, Ledger};
use crate::storage::StateSink;

use super::{date_or_today, parse_date, parse_money};

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Create {
        name: String,
        /// Amount to reach
        #[arg(short, long)]
        target: String,
        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        current: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// List goals with progress
    List,
    /// Show a goal and its history
    Show {
        /// Goal name or ID
        goal: String,
    },
    /// Edit a goal
    Edit {
        /// Goal name or ID
        goal: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        target: Option<String>,
        #[arg(short, long)]
        deadline: Option<String>,
        /// Remove the deadline
        #[arg(long, conflicts_with = "deadline")]
        no_deadline: bool,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a goal; transactions routed to it are kept
    Delete {
        /// Goal name or ID
        goal: String,
    },
    /// Put money toward a goal
    Deposit {
        goal: String,
        amount: String,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Take money back out of a goal
    Withdraw {
        goal: String,
        amount: String,
        #[arg(short, long)]
        date: Option<String>,
    },
}

fn resolve_goal<S: StateSink>(ledger: &Ledger<S>, identifier: &str) -> FintrackResult<GoalId> {
    ledger
        .accounts()
        .find_goal(identifier)
        .map(|g| g.id)
        .ok_or_else(|| FintrackError::goal_not_found(identifier))
}

fn print_progress<S: StateSink>(
    ledger: &Ledger<S>,
    settings: &Settings,
    id: GoalId,
    today: NaiveDate,
) -> FintrackResult<()> {
    let progress = ledger.goal_progress(id, today)?;
    println!(
        "Progress: {} of {} ({}%)",
        settings.format_money(progress.current),
        settings.format_money(progress.target),
        progress.percent
    );
    Ok(())
}

pub fn handle_goal_command<S: StateSink>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    cmd: GoalCommands,
    today: NaiveDate,
) -> FintrackResult<()> {
    match cmd {
        GoalCommands::Create {
            name,
            target,
            current,
            deadline,
            icon,
        } => {
            let mut goal = Goal::new(name, parse_money(&target, "target")?)
                .with_current(parse_money(&current, "current amount")?);
            if let Some(deadline) = deadline {
                goal = goal.with_deadline(parse_date(&deadline)?);
            }
            if let Some(icon) = icon {
                goal.icon = icon;
            }

            let id = ledger.create_goal(goal)?;
            if let Some(goal) = ledger.accounts().get_goal(id) {
                println!("Created goal: {} {}", goal.icon, goal.name);
                println!("  Target: {}", settings.format_money(goal.target));
                println!("  ID: {}", goal.id);
            }
        }

        GoalCommands::List => {
            print!("{}", format_goal_list(ledger.accounts().goals(), today, settings));
        }

        GoalCommands::Show { goal } => {
            let id = resolve_goal(ledger, &goal)?;
            if let Some(goal) = ledger.accounts().get_goal(id) {
                print!("{}", format_goal_details(goal, today, settings));
            }
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            deadline,
            no_deadline,
            icon,
        } => {
            let id = resolve_goal(ledger, &goal)?;
            let deadline = match deadline {
                Some(d) => Some(Some(parse_date(&d)?)),
                None if no_deadline => Some(None),
                None => None,
            };
            let update = GoalUpdate {
                name,
                target: target.map(|t| parse_money(&t, "target")).transpose()?,
                deadline,
                icon,
            };

            let updated = ledger.update_goal(id, update)?;
            println!("Updated goal: {} {}", updated.icon, updated.name);
        }

        GoalCommands::Delete { goal } => {
            let id = resolve_goal(ledger, &goal)?;
            let deleted = ledger.delete_goal(id)?;
            println!("Deleted goal: {}", deleted.name);
        }

        GoalCommands::Deposit { goal, amount, date } => {
            let id = resolve_goal(ledger, &goal)?;
            record_goal_movement(ledger, id, &amount, date.as_deref(), today, true)?;
            print_progress(ledger, settings, id, today)?;
        }

        GoalCommands::Withdraw { goal, amount, date } => {
            let id = resolve_goal(ledger, &goal)?;
            record_goal_movement(ledger, id, &amount, date.as_deref(), today, false)?;
            print_progress(ledger, settings, id, today)?;
        }
    }

    Ok(())
}

fn record_goal_movement<S: StateSink>(
    ledger: &mut Ledger<S>,
    id: GoalId,
    amount: &str,
    date: Option<&str>,
    today: NaiveDate,
    deposit: bool,
) -> FintrackResult<()> {
    let amount = parse_money(amount, "amount")?;
    let date = date_or_today(date, today)?;
    let txn = if deposit {
        Transaction::income("Deposit", amount, GOAL_SAVINGS_CATEGORY, date)
    } else {
        Transaction::expense("Withdraw", amount, GOAL_SAVINGS_CATEGORY, date)
    };
    ledger.record(txn.routed_to(Routing::Goal(id)))?;
    Ok(())
}
