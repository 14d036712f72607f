//! CLI command for the monthly report

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::{MonthlySummary, ReportPeriod};
use crate::storage::ExpenseStore;

/// Build a period from optional month/year arguments, defaulting each to the
/// current month
pub fn resolve_period(month: Option<u32>, year: Option<i32>) -> ExpenseResult<ReportPeriod> {
    let current = ReportPeriod::current();
    ReportPeriod::new(
        month.unwrap_or(current.month()),
        year.unwrap_or(current.year()),
    )
}

/// Handle `expense report`
pub fn handle_report(
    store: &ExpenseStore,
    settings: &Settings,
    period: ReportPeriod,
    output: Option<PathBuf>,
) -> ExpenseResult<()> {
    let summary = MonthlySummary::summarize(store.all(), period);

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        summary.export_csv(BufWriter::new(file))?;
        println!("Report for {} exported to: {}", period, path.display());
    } else {
        print!("{}", summary.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}
