//! Expense repository for JSON storage
//!
//! Holds the ordered list of expenses in memory and mirrors it to a single
//! versioned JSON document on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

use super::file_io::{read_json, write_json_atomic};

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Serializable file layout
#[derive(Debug, Deserialize)]
struct ExpenseData {
    #[serde(default = "default_schema_version")]
    schema_version: u32,
    #[serde(default)]
    expenses: Vec<Expense>,
}

impl Default for ExpenseData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            expenses: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct ExpenseDataRef<'a> {
    schema_version: u32,
    expenses: &'a [Expense],
}

/// Append-only, insertion-ordered expense store
#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
    expenses: Vec<Expense>,
    /// Set when an append could not be persisted
    dirty: bool,
}

impl ExpenseStore {
    /// Create an empty store bound to `path` without touching the filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            expenses: Vec::new(),
            dirty: false,
        }
    }

    /// Create a store and load it from `path`
    pub fn open(path: impl Into<PathBuf>) -> ExpenseResult<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load expenses from disk, replacing the in-memory contents
    ///
    /// A missing file yields an empty store. Unparseable content, an unknown
    /// schema version, or an invalid record is a [`ExpenseError::Persistence`]
    /// error and leaves the in-memory contents untouched.
    pub fn load(&mut self) -> ExpenseResult<()> {
        let data: ExpenseData = read_json(&self.path)?;

        if data.schema_version != SCHEMA_VERSION {
            return Err(ExpenseError::Persistence(format!(
                "Unsupported schema version {} in {} (expected {})",
                data.schema_version,
                self.path.display(),
                SCHEMA_VERSION
            )));
        }

        for (index, expense) in data.expenses.iter().enumerate() {
            expense.validate().map_err(|e| {
                ExpenseError::Persistence(format!(
                    "Invalid record #{} in {}: {}",
                    index + 1,
                    self.path.display(),
                    e
                ))
            })?;
        }

        tracing::debug!(
            path = %self.path.display(),
            count = data.expenses.len(),
            "loaded expenses"
        );
        self.expenses = data.expenses;
        self.dirty = false;
        Ok(())
    }

    /// Save all expenses to disk atomically
    pub fn save(&mut self) -> ExpenseResult<()> {
        let data = ExpenseDataRef {
            schema_version: SCHEMA_VERSION,
            expenses: &self.expenses,
        };
        write_json_atomic(&self.path, &data)?;

        tracing::debug!(
            path = %self.path.display(),
            count = self.expenses.len(),
            "saved expenses"
        );
        self.dirty = false;
        Ok(())
    }

    /// Record a new expense and persist the store
    ///
    /// On a validation failure the store is unchanged. On a save failure the
    /// expense stays in memory, [`has_unsaved_changes`](Self::has_unsaved_changes)
    /// turns true, and the persistence error is returned.
    pub fn add(
        &mut self,
        amount: f64,
        description: &str,
        category: &str,
        date: Option<NaiveDate>,
    ) -> ExpenseResult<Expense> {
        let expense = Expense::new(amount, description, category, date)?;
        self.expenses.push(expense.clone());
        tracing::debug!(id = %expense.id(), amount = %expense.amount(), "added expense");

        if let Err(e) = self.save() {
            self.dirty = true;
            tracing::warn!(id = %expense.id(), error = %e, "expense kept in memory but not saved");
            return Err(e);
        }

        Ok(expense)
    }

    /// All expenses in insertion order
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Whether the in-memory contents differ from the last successful save
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Move an unreadable data file aside so a fresh store can be started
    ///
    /// Returns the path the file was moved to.
    pub fn quarantine(&self) -> ExpenseResult<PathBuf> {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "expenses".to_string());
        let target = self.path.with_file_name(format!(
            "{}.corrupt-{}.json",
            stem,
            Local::now().format("%Y%m%d-%H%M%S")
        ));

        fs::rename(&self.path, &target).map_err(|e| {
            ExpenseError::Persistence(format!(
                "Failed to move {} aside: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::warn!(
            from = %self.path.display(),
            to = %target.display(),
            "quarantined unreadable data file"
        );
        Ok(target)
    }
}
