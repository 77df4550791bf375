use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fintrack::cli::{
    handle_asset_command, handle_audit_command, handle_budget_command, handle_category_command,
    handle_goal_command, handle_report_command, handle_transaction_command,
};
use fintrack::config::{FintrackPaths, Settings};
use fintrack::services::Ledger;
use fintrack::storage::JsonStore;

const LOG_ENV: &str = "FINTRACK_LOG";

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker for assets, goals and a monthly budget",
    long_about = "fintrack keeps a log of income and expenses and reconciles it \
                  with your assets, savings goals and budget. Routed transactions \
                  move account balances; voiding one reverses the move."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with demo data
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Asset management commands
    #[command(subcommand)]
    Asset(fintrack::cli::AssetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(fintrack::cli::GoalCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(fintrack::cli::TransactionCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(fintrack::cli::BudgetCommands),

    /// Spending and net worth reports
    #[command(subcommand)]
    Report(fintrack::cli::ReportCommands),

    /// Category commands
    #[command(subcommand)]
    Category(fintrack::cli::CategoryCommands),

    /// Show recent changes from the audit log
    Audit {
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },

    /// Replace all data with the demo data
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Delete all assets, goals and transactions
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set a value (currency_symbol, date_format, default_budget_limit)
    Set { key: String, value: String },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let today: NaiveDate = Local::now().date_naive();

    let paths = FintrackPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut store = JsonStore::new(paths.clone())?;
    let state = store.load(today)?;
    let mut ledger = Ledger::new(state, store).with_default_budget_limit(settings.default_budget_limit);

    match cli.command {
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            settings.setup_completed = true;
            settings.save(&paths)?;
            ledger.reset_to_seed(today);
            println!("Initialization complete!");
            println!();
            println!("Demo assets, goals and transactions have been created.");
            println!("Run 'fintrack asset list' to see them, or 'fintrack clear --yes' to start empty.");
        }
        Some(Commands::Config { action: None }) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  currency_symbol:      {}", settings.currency_symbol);
            println!("  date_format:          {}", settings.date_format);
            println!(
                "  default_budget_limit: {}",
                settings.format_money(settings.default_budget_limit)
            );
        }
        Some(Commands::Config {
            action: Some(ConfigCommands::Set { key, value }),
        }) => {
            settings.set(&key, &value)?;
            settings.save(&paths)?;
            println!("Set {} = {}", key, value);
        }
        Some(Commands::Asset(cmd)) => handle_asset_command(&mut ledger, &settings, cmd, today)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&mut ledger, &settings, cmd, today)?,
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&mut ledger, &settings, cmd, today)?
        }
        Some(Commands::Budget(cmd)) => handle_budget_command(&mut ledger, &settings, cmd, today)?,
        Some(Commands::Report(cmd)) => handle_report_command(&ledger, cmd, today)?,
        Some(Commands::Category(cmd)) => handle_category_command(&mut ledger, cmd)?,
        Some(Commands::Audit { count }) => handle_audit_command(ledger.sink().audit_logger(), count)?,
        Some(Commands::Reset { yes }) => {
            if !yes {
                bail!("Refusing to reset without --yes");
            }
            ledger.reset_to_seed(today);
            println!("Restored demo data.");
        }
        Some(Commands::Clear { yes }) => {
            if !yes {
                bail!("Refusing to clear without --yes");
            }
            ledger.clear(today);
            println!("All data cleared.");
        }
        None => {
            println!("fintrack - personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}
