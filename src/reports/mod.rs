//! Reports module
//!
//! Aggregations over the expense store.

pub mod monthly;

pub use monthly::{CategoryTotal, MonthlySummary, ReportPeriod};
