//! Expense model
//!
//! A single expense record. Records are immutable once constructed; the only
//! way to obtain one is through [`Expense::new`], which enforces the amount
//! invariant.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;
use crate::error::ExpenseError;

/// Largest amount a single record may hold ($1,000,000,000.00)
///
/// Keeps monthly totals far from the i64 cents limit.
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,

    /// Amount spent, never negative
    amount: Money,

    #[serde(default)]
    description: String,

    /// Free-text grouping key, compared case-sensitively
    #[serde(default)]
    category: String,

    /// Day the expense applies to
    date: NaiveDate,

    created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    ///
    /// `date` defaults to today's local date. Fails with
    /// [`ExpenseError::Validation`] if `amount` is NaN, infinite, negative,
    /// or above [`MAX_AMOUNT`].
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<Self, ExpenseError> {
        // Checked before rounding so values like -0.004 cannot become zero
        if amount < 0.0 {
            return Err(ExpenseError::Validation(format!(
                "amount must not be negative, got {}",
                amount
            )));
        }
        let amount = Money::from_decimal(amount)?;

        let expense = Self {
            id: ExpenseId::new(),
            amount,
            description: description.into().trim().to_string(),
            category: category.into().trim().to_string(),
            date: date.unwrap_or_else(|| Local::now().date_naive()),
            created_at: Utc::now(),
        };
        expense.validate()?;

        Ok(expense)
    }

    /// Check the record invariants
    ///
    /// Deserialized records bypass [`Expense::new`], so the store calls this
    /// on every record it loads.
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.amount.is_negative() {
            return Err(ExpenseError::Validation(format!(
                "amount must not be negative, got {}",
                self.amount
            )));
        }
        if self.amount > MAX_AMOUNT {
            return Err(ExpenseError::Validation(format!(
                "amount must not exceed {}, got {}",
                MAX_AMOUNT, self.amount
            )));
        }
        Ok(())
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Category label for display; empty categories show as "(uncategorized)"
    pub fn category_label(&self) -> &str {
        category_label(&self.category)
    }
}

/// Display label for a category key
pub fn category_label(category: &str) -> &str {
    if category.is_empty() {
        "(uncategorized)"
    } else {
        category
    }
}
