//! Process-local storage backend.
//!
//! Mirrors the Postgres repositories operation for operation so the server
//! can run (and be tested) without a database. Data lives for the lifetime
//! of the process.

use chrono::Utc;
use duebook_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::expense::{CreateExpense, Expense, ExpenseFilter, UpdateExpense};
use crate::models::user::{CreateUser, User};

#[derive(Debug, Default)]
struct MemoryState {
    last_expense_id: DbId,
    expenses: Vec<Expense>,
    last_user_id: DbId,
    users: Vec<User>,
}

/// In-memory store guarded by a single async `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -- expenses -------------------------------------------------------------

    pub async fn create_expense(&self, input: &CreateExpense) -> Expense {
        let mut state = self.state.write().await;
        state.last_expense_id += 1;
        let now = Utc::now();
        let expense = Expense {
            id: state.last_expense_id,
            name: input.name.clone(),
            expense_type: input.expense_type.clone(),
            amount: input.amount,
            due_date: input.due_date,
            paid: input.paid,
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        };
        state.expenses.push(expense.clone());
        expense
    }

    pub async fn find_expense(&self, id: DbId) -> Option<Expense> {
        let state = self.state.read().await;
        state.expenses.iter().find(|e| e.id == id).cloned()
    }

    pub async fn list_expenses(
        &self,
        filter: &ExpenseFilter,
        limit: i64,
        offset: i64,
    ) -> Vec<Expense> {
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        self.list_all_expenses(filter)
            .await
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect()
    }

    pub async fn list_all_expenses(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        let state = self.state.read().await;
        let mut matching: Vec<Expense> = state
            .expenses
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        matching.sort_by_key(|e| (e.due_date, e.id));
        matching
    }

    pub async fn count_expenses(&self, filter: &ExpenseFilter) -> i64 {
        let state = self.state.read().await;
        let count = state.expenses.iter().filter(|e| filter.matches(e)).count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    pub async fn update_expense(&self, id: DbId, input: &UpdateExpense) -> Option<Expense> {
        let mut state = self.state.write().await;
        let expense = state.expenses.iter_mut().find(|e| e.id == id)?;
        if let Some(name) = &input.name {
            expense.name = name.clone();
        }
        if let Some(expense_type) = &input.expense_type {
            expense.expense_type = expense_type.clone();
        }
        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        if let Some(due_date) = input.due_date {
            expense.due_date = due_date;
        }
        if let Some(paid) = input.paid {
            expense.paid = paid;
        }
        expense.updated_at = Utc::now();
        Some(expense.clone())
    }

    pub async fn toggle_paid(&self, id: DbId) -> Option<Expense> {
        let mut state = self.state.write().await;
        let expense = state.expenses.iter_mut().find(|e| e.id == id)?;
        expense.paid = !expense.paid;
        expense.updated_at = Utc::now();
        Some(expense.clone())
    }

    pub async fn delete_expense(&self, id: DbId) -> bool {
        let mut state = self.state.write().await;
        let before = state.expenses.len();
        state.expenses.retain(|e| e.id != id);
        state.expenses.len() < before
    }

    // -- users ----------------------------------------------------------------

    /// Insert a user. Emails are unique, as with `uq_users_email`.
    pub async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.email == input.email) {
            return Err(StoreError::Duplicate(format!(
                "email '{}' is already registered",
                input.email
            )));
        }
        state.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: state.last_user_id,
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    pub async fn find_user(&self, id: DbId) -> Option<User> {
        let state = self.state.read().await;
        state.users.iter().find(|u| u.id == id).cloned()
    }

    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        let state = self.state.read().await;
        state.users.iter().find(|u| u.email == email).cloned()
    }
}
