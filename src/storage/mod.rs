//! Storage layer for expense-cli
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod expenses;
pub mod file_io;

pub use expenses::{ExpenseStore, SCHEMA_VERSION};
pub use file_io::{read_json, write_json_atomic};
