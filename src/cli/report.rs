//! Report CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::error::{FintrackError, FintrackResult};
use crate::reports::{NetWorthReport, ReportWindow};
use crate::services::Ledger;
use crate::storage::StateSink;

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Expense totals per category
    Breakdown {
        /// week, month or year
        #[arg(short, long, default_value = "month")]
        window: String,
    },
    /// Expenses in this window against the previous one
    Compare {
        #[arg(short, long, default_value = "month")]
        window: String,
    },
    /// Assets grouped by type, plus goal savings
    NetWorth,
}

fn parse_window(input: &str) -> FintrackResult<ReportWindow> {
    ReportWindow::parse(input).ok_or_else(|| {
        FintrackError::Validation(format!(
            "Invalid window '{}'. Valid: week, month, year",
            input
        ))
    })
}

pub fn handle_report_command<S: StateSink>(
    ledger: &Ledger<S>,
    cmd: ReportCommands,
    today: NaiveDate,
) -> FintrackResult<()> {
    match cmd {
        ReportCommands::Breakdown { window } => {
            let report = ledger.breakdown_by_category(parse_window(&window)?, today);
            print!("{}", report.format_terminal());
        }
        ReportCommands::Compare { window } => {
            let report = ledger.period_comparison(parse_window(&window)?, today);
            print!("{}", report.format_terminal());
        }
        ReportCommands::NetWorth => {
            let accounts = ledger.accounts();
            let report = NetWorthReport::generate(accounts.assets(), accounts.goals());
            print!("{}", report.format_terminal());
        }
    }
    Ok(())
}
