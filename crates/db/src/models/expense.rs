//! Expense entity model, DTOs and list filter.

use chrono::NaiveDate;
use duebook_core::due_status::StatusWindow;
use duebook_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An expense row from the `expenses` table.
///
/// Only the stored `paid` flag lives here; the derived due status is
/// computed per request from `due_date` and the caller's threshold.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Expense {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub paid: bool,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new expense.
#[derive(Debug, Clone)]
pub struct CreateExpense {
    pub name: String,
    pub expense_type: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub paid: bool,
    /// The authenticated user creating the record.
    pub user_id: DbId,
}

/// DTO for updating an existing expense. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExpense {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub expense_type: Option<String>,
    pub amount: Option<Money>,
    pub due_date: Option<NaiveDate>,
    pub paid: Option<bool>,
}

/// Optional constraints applied when listing expenses. `None` fields match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub user_id: Option<DbId>,
    /// Exact category match.
    pub expense_type: Option<String>,
    /// Case-insensitive name prefix.
    pub name_prefix: Option<String>,
    /// Exact due day.
    pub due_on: Option<NaiveDate>,
    /// Stored flag, independent of the derived status.
    pub paid: Option<bool>,
    /// Range equivalent to a derived status for a given day and threshold.
    pub status: Option<StatusWindow>,
}

impl ExpenseFilter {
    /// Evaluate the filter against one row. The Postgres repository encodes
    /// the same predicate in SQL.
    pub fn matches(&self, expense: &Expense) -> bool {
        if self.user_id.is_some_and(|id| id != expense.user_id) {
            return false;
        }
        if let Some(expense_type) = &self.expense_type {
            if *expense_type != expense.expense_type {
                return false;
            }
        }
        if let Some(prefix) = &self.name_prefix {
            if !expense
                .name
                .to_lowercase()
                .starts_with(&prefix.to_lowercase())
            {
                return false;
            }
        }
        if self.due_on.is_some_and(|day| day != expense.due_date) {
            return false;
        }
        if self.paid.is_some_and(|paid| paid != expense.paid) {
            return false;
        }
        if let Some(window) = &self.status {
            if !window.contains(expense.paid, expense.due_date) {
                return false;
            }
        }
        true
    }
}
