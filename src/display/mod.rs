//! Display formatting for terminal output

pub mod account;
pub mod budget;
pub mod category;
pub mod transaction;

pub use account::{format_asset_details, format_asset_list, format_goal_details, format_goal_list};
pub use budget::format_budget_status;
pub use category::format_category_list;
pub use transaction::{format_transaction_register, format_transaction_row, routing_label};
