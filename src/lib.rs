//! expense-cli - Terminal-based personal expense tracker
//!
//! Records individual expenses (amount, description, category, date) and
//! produces a monthly total with a per-category breakdown, either through an
//! interactive text menu or through non-interactive subcommands.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, expense records)
//! - `storage`: JSON file storage with atomic writes
//! - `reports`: Monthly summaries
//! - `shell`: Interactive menu loop
//! - `cli`: Command handlers used by the `expense` binary
//! - `display`, `export`: Terminal tables and CSV output
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_cli::reports::{MonthlySummary, ReportPeriod};
//! use expense_cli::storage::ExpenseStore;
//!
//! # fn main() -> expense_cli::ExpenseResult<()> {
//! let mut store = ExpenseStore::open("expenses.json")?;
//! store.add(12.50, "lunch", "food", None)?;
//!
//! let summary = MonthlySummary::summarize(store.all(), ReportPeriod::current());
//! print!("{}", summary.format_terminal("$"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod shell;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
