//! CSV Export functionality
//!
//! Exports expense records to a spreadsheet-compatible CSV file.

use std::io::Write;

use crate::error::ExpenseResult;
use crate::models::Expense;

/// Export expenses to CSV, one row per record in store order
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);

    wtr.write_record(["ID", "Date", "Category", "Description", "Amount"])?;

    for expense in expenses {
        wtr.write_record([
            expense.id().as_uuid().to_string(),
            expense.date().format("%Y-%m-%d").to_string(),
            expense.category().to_string(),
            expense.description().to_string(),
            expense.amount().format_decimal(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
