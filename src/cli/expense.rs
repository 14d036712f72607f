//! Expense CLI commands
//!
//! Non-interactive `add`, `list` and `export` commands.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::format_expense_list;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::export_expenses_csv;
use crate::models::Expense;
use crate::reports::ReportPeriod;
use crate::shell::input::parse_amount;
use crate::storage::ExpenseStore;

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(s: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Input(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}

/// Handle `expense add`
pub fn handle_add(
    store: &mut ExpenseStore,
    settings: &Settings,
    amount: &str,
    description: Option<String>,
    category: Option<String>,
    date: Option<String>,
) -> ExpenseResult<()> {
    let amount = parse_amount(amount)?;
    let date = date.as_deref().map(parse_date).transpose()?;

    let expense = store.add(
        amount,
        description.as_deref().unwrap_or(""),
        category.as_deref().unwrap_or(""),
        date,
    )?;

    println!(
        "Added {} {} ({}) on {}",
        expense.id(),
        expense.amount().format_with_symbol(&settings.currency_symbol),
        expense.category_label(),
        expense.date()
    );
    Ok(())
}

/// Handle `expense list`
pub fn handle_list(
    store: &ExpenseStore,
    settings: &Settings,
    period: Option<ReportPeriod>,
) -> ExpenseResult<()> {
    let expenses: Vec<Expense> = store
        .all()
        .iter()
        .filter(|e| period.map_or(true, |p| p.contains(e.date())))
        .cloned()
        .collect();

    print!("{}", format_expense_list(&expenses, settings));
    Ok(())
}

/// Handle `expense export`
pub fn handle_export(store: &ExpenseStore, path: &Path) -> ExpenseResult<()> {
    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    export_expenses_csv(store.all(), BufWriter::new(file))?;

    println!("Exported {} expenses to: {}", store.len(), path.display());
    Ok(())
}
