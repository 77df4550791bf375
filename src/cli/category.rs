//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::FintrackResult;
use crate::models::Category;
use crate::services::Ledger;
use crate::storage::StateSink;

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List,
    /// Add a custom category
    Add {
        name: String,
        #[arg(long, default_value = "🏷️")]
        icon: String,
    },
}

pub fn handle_category_command<S: StateSink>(
    ledger: &mut Ledger<S>,
    cmd: CategoryCommands,
) -> FintrackResult<()> {
    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(ledger.categories()));
        }
        CategoryCommands::Add { name, icon } => {
            ledger.add_category(Category::custom(name.clone(), icon))?;
            println!("Added category: {}", name.trim());
        }
    }
    Ok(())
}
