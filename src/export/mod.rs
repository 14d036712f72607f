//! Export module for expense-cli
//!
//! CSV export of expense records. Monthly summaries export themselves via
//! [`MonthlySummary::export_csv`](crate::reports::MonthlySummary::export_csv).

pub mod csv;

pub use self::csv::export_expenses_csv;
