//! Monthly Report
//!
//! Totals the expenses of one calendar month and breaks them down by
//! category.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::expense::category_label;
use crate::models::{Expense, Money};

/// A (month, year) reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportPeriod {
    month: u32,
    year: i32,
}

impl ReportPeriod {
    /// Create a period; `month` must be in `1..=12`
    pub fn new(month: u32, year: i32) -> ExpenseResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ExpenseError::Input(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { month, year })
    }

    /// The period containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Subtotal for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

/// Total and per-category breakdown for a reporting period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub period: ReportPeriod,
    pub total: Money,
    /// Category subtotals in first-seen order
    pub breakdown: Vec<CategoryTotal>,
}

impl MonthlySummary {
    /// Summarize the expenses that fall within `period`
    ///
    /// Records are scanned once in store order.
    pub fn summarize(records: &[Expense], period: ReportPeriod) -> Self {
        let mut total = Money::zero();
        let mut breakdown: Vec<CategoryTotal> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for expense in records.iter().filter(|e| period.contains(e.date())) {
            total += expense.amount();

            let index = *positions.entry(expense.category()).or_insert_with(|| {
                breakdown.push(CategoryTotal {
                    category: expense.category().to_string(),
                    total: Money::zero(),
                    count: 0,
                });
                breakdown.len() - 1
            });

            let entry = &mut breakdown[index];
            entry.total += expense.amount();
            entry.count += 1;
        }

        Self {
            period,
            total,
            breakdown,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breakdown.is_empty()
    }

    /// Number of expenses included in the summary
    pub fn expense_count(&self) -> usize {
        self.breakdown.iter().map(|c| c.count).sum()
    }

    /// Breakdown as (category, amount) pairs in first-seen order
    pub fn breakdown_map(&self) -> Vec<(&str, Money)> {
        self.breakdown
            .iter()
            .map(|c| (c.category.as_str(), c.total))
            .collect()
    }

    /// Subtotal of one category, if it has any expenses in the period
    pub fn category_total(&self, category: &str) -> Option<Money> {
        self.breakdown
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.total)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Expense Report for {}:\n", self.period));
        output.push_str(&format!(
            "Total Expenses: {}\n",
            self.total.format_with_symbol(currency_symbol)
        ));

        if self.breakdown.is_empty() {
            output.push_str("No expenses found for this month.\n");
        } else {
            output.push_str("\nCategory Breakdown:\n");
            for entry in &self.breakdown {
                output.push_str(&format!(
                    "- {}: {}\n",
                    category_label(&entry.category),
                    entry.total.format_with_symbol(currency_symbol)
                ));
            }
        }

        output
    }

    /// Export the breakdown to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(["Period", "Category", "Count", "Amount"])?;
        for entry in &self.breakdown {
            wtr.write_record([
                self.period.to_string(),
                entry.category.clone(),
                entry.count.to_string(),
                entry.total.format_decimal(),
            ])?;
        }
        wtr.write_record([
            self.period.to_string(),
            "TOTAL".to_string(),
            self.expense_count().to_string(),
            self.total.format_decimal(),
        ])?;

        wtr.flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        Ok(())
    }
}
