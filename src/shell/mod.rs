//! Interactive menu shell
//!
//! A blocking read-eval-print loop over any `BufRead`/`Write` pair. Input and
//! validation errors are reported and the loop carries on; only terminal I/O
//! failures end it early.

pub mod input;

use std::io::{BufRead, Write};

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::{MonthlySummary, ReportPeriod};
use crate::storage::ExpenseStore;

use input::{parse_amount, parse_month, parse_year, prompt_line};

/// A top-level menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddExpense,
    MonthlyReport,
    Exit,
}

impl MenuChoice {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Self::AddExpense),
            "2" => Some(Self::MonthlyReport),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// The interactive session; owns the store for its lifetime
pub struct Shell<R, W> {
    store: ExpenseStore,
    settings: Settings,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: ExpenseStore, settings: Settings, input: R, output: W) -> Self {
        Self {
            store,
            settings,
            input,
            output,
        }
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    /// Give the store back once the session is over
    pub fn into_store(self) -> ExpenseStore {
        self.store
    }

    /// Run the menu loop until the user exits or input ends
    pub fn run(&mut self) -> ExpenseResult<()> {
        tracing::debug!(path = %self.store.path().display(), "starting shell");

        loop {
            self.print_menu()?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let step = match MenuChoice::parse(&choice) {
                Some(MenuChoice::AddExpense) => self.add_expense()?,
                Some(MenuChoice::MonthlyReport) => self.monthly_report()?,
                Some(MenuChoice::Exit) => Step::Exit,
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Step::Continue
                }
            };

            if step == Step::Exit {
                break;
            }
        }

        self.finish()
    }

    fn print_menu(&mut self) -> ExpenseResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Expense Tracker")?;
        writeln!(self.output, "1. Add Expense")?;
        writeln!(self.output, "2. View Monthly Report")?;
        writeln!(self.output, "3. Exit")?;
        Ok(())
    }

    fn add_expense(&mut self) -> ExpenseResult<Step> {
        let Some(amount) = self.prompt_parsed("Enter amount: ", parse_amount)? else {
            return Ok(Step::Exit);
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(Step::Exit);
        };
        let Some(category) =
            self.prompt("Enter category (e.g., food, transportation): ")?
        else {
            return Ok(Step::Exit);
        };

        match self.store.add(amount, &description, &category, None) {
            Ok(_) => writeln!(self.output, "Expense added successfully!")?,
            Err(e @ ExpenseError::Validation(_)) => {
                writeln!(self.output, "{}", e)?;
                writeln!(self.output, "Expense not added.")?;
            }
            Err(e @ ExpenseError::Persistence(_)) => self.warn_unsaved(&e)?,
            Err(e) => return Err(e),
        }

        Ok(Step::Continue)
    }

    fn monthly_report(&mut self) -> ExpenseResult<Step> {
        let Some(month) = self.prompt_parsed("Enter month (1-12): ", parse_month)? else {
            return Ok(Step::Exit);
        };
        let Some(year) = self.prompt_parsed("Enter year: ", parse_year)? else {
            return Ok(Step::Exit);
        };

        let period = ReportPeriod::new(month, year)?;
        let summary = MonthlySummary::summarize(self.store.all(), period);
        write!(
            self.output,
            "{}",
            summary.format_terminal(&self.settings.currency_symbol)
        )?;

        Ok(Step::Continue)
    }

    /// Last attempt to persist anything a failed save left behind
    fn finish(&mut self) -> ExpenseResult<()> {
        if self.store.has_unsaved_changes() {
            if let Err(e) = self.store.save() {
                self.warn_unsaved(&e)?;
            }
        }

        writeln!(self.output, "Exiting Expense Tracker.")?;
        Ok(())
    }

    fn warn_unsaved(&mut self, err: &ExpenseError) -> ExpenseResult<()> {
        writeln!(self.output, "WARNING: {}", err)?;
        writeln!(
            self.output,
            "WARNING: The expense is kept in memory for this session but was NOT saved to {}.",
            self.store.path().display()
        )?;
        Ok(())
    }

    fn prompt(&mut self, prompt: &str) -> ExpenseResult<Option<String>> {
        prompt_line(&mut self.input, &mut self.output, prompt)
    }

    /// Prompt until `parse` accepts the answer; input errors are shown and re-asked
    fn prompt_parsed<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> ExpenseResult<T>,
    ) -> ExpenseResult<Option<T>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };

            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e @ ExpenseError::Input(_)) => writeln!(self.output, "{}", e)?,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{Datelike, Local};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_session(store: ExpenseStore, script: &str) -> (ExpenseStore, String) {
        let mut output = Vec::new();
        let mut shell = Shell::new(
            store,
            Settings::default(),
            Cursor::new(script.to_string()),
            &mut output,
        );
        shell.run().unwrap();
        let store = shell.into_store();
        (store, String::from_utf8(output).unwrap())
    }

    fn temp_store() -> (TempDir, ExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AddExpense));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::MonthlyReport));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("4"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn test_exit_immediately() {
        let (_temp_dir, store) = temp_store();
        let (_, out) = run_session(store, "3\n");

        assert!(out.contains("Expense Tracker\n1. Add Expense\n2. View Monthly Report\n3. Exit\n"));
        assert!(out.ends_with("Exiting Expense Tracker.\n"));
    }

    #[test]
    fn test_add_expense() {
        let (_temp_dir, store) = temp_store();
        let (store, out) = run_session(store, "1\n12.75\nlunch\nfood\n3\n");

        assert!(out.contains("Expense added successfully!"));
        assert_eq!(store.len(), 1);
        let expense = &store.all()[0];
        assert_eq!(expense.amount(), Money::from_cents(1275));
        assert_eq!(expense.description(), "lunch");
        assert_eq!(expense.category(), "food");
        assert_eq!(expense.date(), Local::now().date_naive());
        assert!(store.path().exists());
    }

    #[test]
    fn test_bad_amount_reprompts() {
        let (_temp_dir, store) = temp_store();
        let (store, out) = run_session(store, "1\nabc\n5\n\nmisc\n3\n");

        assert!(out.contains("Input error: 'abc' is not a valid amount"));
        assert_eq!(out.matches("Enter amount: ").count(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].amount(), Money::from_cents(500));
    }

    #[test]
    fn test_negative_amount_is_reported_not_added() {
        let (_temp_dir, store) = temp_store();
        let (store, out) = run_session(store, "1\n-4\nrefund\nfood\n3\n");

        assert!(out.contains("Validation error"));
        assert!(out.contains("Expense not added."));
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_choice_redisplays_menu() {
        let (_temp_dir, store) = temp_store();
        let (_, out) = run_session(store, "9\n3\n");

        assert!(out.contains("Invalid choice. Please try again."));
        assert_eq!(out.matches("1. Add Expense").count(), 2);
    }

    #[test]
    fn test_non_utf8_input_is_not_fatal() {
        let (_temp_dir, store) = temp_store();
        let mut output = Vec::new();
        let mut shell = Shell::new(
            store,
            Settings::default(),
            Cursor::new(b"\xff\xfe\n1\n\xff\n2\n\xc3\n\n3\n".to_vec()),
            &mut output,
        );
        shell.run().unwrap();
        let store = shell.into_store();
        let out = String::from_utf8(output).unwrap();

        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.contains("is not a valid amount"));
        assert!(out.contains("Expense added successfully!"));
        assert!(out.ends_with("Exiting Expense Tracker.\n"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].amount(), Money::from_cents(200));
    }

    #[test]
    fn test_monthly_report() {
        let (_temp_dir, store) = temp_store();
        let today = Local::now().date_naive();
        let script = format!(
            "1\n10\ngroceries\nfood\n1\n5.50\nsnack\nfood\n2\n{}\n{}\n3\n",
            today.month(),
            today.year()
        );
        let (_, out) = run_session(store, &script);

        assert!(out.contains(&format!(
            "Expense Report for {}/{}:",
            today.month(),
            today.year()
        )));
        assert!(out.contains("Total Expenses: $15.50"));
        assert!(out.contains("Category Breakdown:\n- food: $15.50\n"));
    }

    #[test]
    fn test_report_bad_month_reprompts() {
        let (_temp_dir, store) = temp_store();
        let (_, out) = run_session(store, "2\n13\nJan\n1\n1999\n3\n");

        assert!(out.contains("month must be between 1 and 12, got 13"));
        assert!(out.contains("'Jan' is not a valid month"));
        assert!(out.contains("Expense Report for 1/1999:"));
        assert!(out.contains("No expenses found for this month."));
    }

    #[test]
    fn test_eof_ends_session() {
        let (_temp_dir, store) = temp_store();
        let (store, out) = run_session(store, "1\n3.00\n");

        assert!(store.is_empty());
        assert!(out.ends_with("Exiting Expense Tracker.\n"));
    }

    #[test]
    fn test_save_failure_warns_and_keeps_record() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = ExpenseStore::new(blocker.join("expenses.json"));

        let (store, out) = run_session(store, "1\n8\nbook\nfun\n3\n");

        assert!(out.contains("WARNING: Persistence error"));
        assert!(out.contains("was NOT saved"));
        assert!(!out.contains("Expense added successfully!"));
        assert_eq!(store.len(), 1);
        assert!(store.has_unsaved_changes());
    }
}
