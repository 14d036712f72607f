//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing in `main.rs` with the store and report engine.

pub mod expense;
pub mod report;
pub mod shell;

pub use expense::{handle_add, handle_export, handle_list};
pub use report::{handle_report, resolve_period};
pub use shell::{open_store_for_shell, start_shell};
