//! Core data models for expense-cli

pub mod expense;
pub mod ids;
pub mod money;

pub use expense::Expense;
pub use ids::ExpenseId;
pub use money::Money;
