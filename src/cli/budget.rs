//! Budget CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_status;
use crate::error::FintrackResult;
use crate::models::BudgetConfig;
use crate::services::Ledger;
use crate::storage::StateSink;

use super::{date_or_today, parse_date, parse_money};

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the budget as of today or a given date
    Show {
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Change the limit and/or window
    Set {
        #[arg(short, long)]
        limit: Option<String>,
        /// First day of the window (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Last day of the window (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },
    /// Restart the window on the current calendar month
    NewMonth {
        /// Limit for the month; keeps the current limit when omitted
        #[arg(short, long)]
        limit: Option<String>,
    },
}

pub fn handle_budget_command<S: StateSink>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    cmd: BudgetCommands,
    today: NaiveDate,
) -> FintrackResult<()> {
    match cmd {
        BudgetCommands::Show { as_of } => {
            let as_of = date_or_today(as_of.as_deref(), today)?;
            let status = ledger.query_budget(as_of);
            print!("{}", format_budget_status(&status, settings));
        }

        BudgetCommands::Set { limit, start, end } => {
            let current = *ledger.budget();
            let config = BudgetConfig::new(
                limit
                    .map(|l| parse_money(&l, "limit"))
                    .transpose()?
                    .unwrap_or(current.limit),
                start.as_deref().map(parse_date).transpose()?.unwrap_or(current.start_date),
                end.as_deref().map(parse_date).transpose()?.unwrap_or(current.end_date),
            );
            let updated = ledger.update_budget(config)?;
            println!("Budget updated: {}", updated);
        }

        BudgetCommands::NewMonth { limit } => {
            let limit = match limit {
                Some(l) => parse_money(&l, "limit")?,
                None => ledger.budget().limit,
            };
            let updated = ledger.update_budget(BudgetConfig::for_month(limit, today))?;
            println!("Budget updated: {}", updated);
        }
    }

    Ok(())
}
