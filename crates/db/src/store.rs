//! Backend-agnostic storage handle.

use std::sync::Arc;

use duebook_core::types::DbId;

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::models::expense::{CreateExpense, Expense, ExpenseFilter, UpdateExpense};
use crate::models::user::{CreateUser, User};
use crate::repositories::{ExpenseRepo, UserRepo};
use crate::DbPool;

/// Storage used by the HTTP layer: Postgres through the repositories, or the
/// in-memory store. Cheap to clone.
#[derive(Clone)]
pub enum Store {
    Postgres(DbPool),
    Memory(Arc<MemoryStore>),
}

impl Store {
    /// A fresh, empty in-memory store.
    pub fn memory() -> Self {
        Self::Memory(Arc::new(MemoryStore::new()))
    }

    /// Short backend label for logs and the health endpoint.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        match self {
            Self::Postgres(pool) => Ok(crate::health_check(pool).await?),
            Self::Memory(_) => Ok(()),
        }
    }

    // -- expenses -------------------------------------------------------------

    pub async fn create_expense(&self, input: &CreateExpense) -> Result<Expense, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(ExpenseRepo::create(pool, input).await?),
            Self::Memory(mem) => Ok(mem.create_expense(input).await),
        }
    }

    pub async fn find_expense(&self, id: DbId) -> Result<Option<Expense>, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(ExpenseRepo::find_by_id(pool, id).await?),
            Self::Memory(mem) => Ok(mem.find_expense(id).await),
        }
    }

    /// One page of matching expenses, ordered by due date then id.
    pub async fn list_expenses(
        &self,
        filter: &ExpenseFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Expense>, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(ExpenseRepo::list(pool, filter, limit, offset).await?),
            Self::Memory(mem) => Ok(mem.list_expenses(filter, limit, offset).await),
        }
    }

    /// Every matching expense, ordered by due date then id.
    pub async fn list_all_expenses(
        &self,
        filter: &ExpenseFilter,
    ) -> Result<Vec<Expense>, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(ExpenseRepo::list_all(pool, filter).await?),
            Self::Memory(mem) => Ok(mem.list_all_expenses(filter).await),
        }
    }

    pub async fn count_expenses(&self, filter: &ExpenseFilter) -> Result<i64, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(ExpenseRepo::count(pool, filter).await?),
            Self::Memory(mem) => Ok(mem.count_expenses(filter).await),
        }
    }

    pub async fn update_expense(
        &self,
        id: DbId,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(ExpenseRepo::update(pool, id, input).await?),
            Self::Memory(mem) => Ok(mem.update_expense(id, input).await),
        }
    }

    pub async fn toggle_paid(&self, id: DbId) -> Result<Option<Expense>, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(ExpenseRepo::toggle_paid(pool, id).await?),
            Self::Memory(mem) => Ok(mem.toggle_paid(id).await),
        }
    }

    /// Hard-delete an expense. Returns `true` if a record was removed.
    pub async fn delete_expense(&self, id: DbId) -> Result<bool, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(ExpenseRepo::delete(pool, id).await?),
            Self::Memory(mem) => Ok(mem.delete_expense(id).await),
        }
    }

    // -- users ----------------------------------------------------------------

    pub async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(UserRepo::create(pool, input).await?),
            Self::Memory(mem) => mem.create_user(input).await,
        }
    }

    pub async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(UserRepo::find_by_id(pool, id).await?),
            Self::Memory(mem) => Ok(mem.find_user(id).await),
        }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(UserRepo::find_by_email(pool, email).await?),
            Self::Memory(mem) => Ok(mem.find_user_by_email(email).await),
        }
    }
}
