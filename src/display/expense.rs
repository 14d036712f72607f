//! Expense display formatting
//!
//! Renders expense lists as terminal tables.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Expense;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of expenses as a table, honouring the configured currency
/// symbol and date format
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id().to_string(),
        date: format_date(e.date(), &settings.date_format),
        category: e.category_label().to_string(),
        description: truncate(e.description(), 40),
        amount: e.amount().format_with_symbol(&settings.currency_symbol),
    });

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

/// Format a date with a user-supplied strftime pattern, falling back to ISO
/// dates when the pattern is invalid
fn format_date(date: NaiveDate, pattern: &str) -> String {
    let items = StrftimeItems::new(pattern);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        return date.format("%Y-%m-%d").to_string();
    }
    date.format_with_items(items).to_string()
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_expense_list(&[], &Settings::default()),
            "No expenses found.\n"
        );
    }

    #[test]
    fn test_list_contains_fields() {
        let on = NaiveDate::from_ymd_opt(2024, 8, 9).unwrap();
        let expense = Expense::new(42.0, "dinner", "food", Some(on)).unwrap();
        let settings = Settings {
            currency_symbol: "€".into(),
            date_format: "%d/%m/%Y".into(),
            ..Settings::default()
        };

        let output = format_expense_list(std::slice::from_ref(&expense), &settings);

        assert!(output.contains("Amount"));
        assert!(output.contains(&expense.id().to_string()));
        assert!(output.contains("09/08/2024"));
        assert!(output.contains("dinner"));
        assert!(output.contains("€42.00"));
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let on = NaiveDate::from_ymd_opt(2024, 8, 9).unwrap();
        assert_eq!(format_date(on, "%Q"), "2024-08-09");
        assert_eq!(format_date(on, "%b %d"), "Aug 09");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long description", 10), "a very ...");
    }
}
