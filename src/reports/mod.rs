//! Read-only analytics over the ledger
//!
//! Category breakdowns, period comparisons and the net worth summary.

pub mod net_worth;
pub mod spending;
pub mod window;

pub use net_worth::{AssetTypeGroup, NetWorthReport};
pub use spending::{expense_total, CategoryBreakdown, CategoryTotal, PeriodComparison};
pub use window::ReportWindow;
