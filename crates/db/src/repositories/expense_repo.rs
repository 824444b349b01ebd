//! Repository for the `expenses` table.

use duebook_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{PgPool, Postgres};

use crate::models::expense::{CreateExpense, Expense, ExpenseFilter, UpdateExpense};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, expense_type, amount, due_date, paid, user_id, created_at, updated_at";

/// `WHERE` clause shared by the list and count queries. Every filter is
/// optional: a NULL bind disables its condition.
const FILTER_CLAUSE: &str = "WHERE ($1::BIGINT IS NULL OR user_id = $1)
       AND ($2::TEXT IS NULL OR expense_type = $2)
       AND ($3::TEXT IS NULL OR LOWER(name) LIKE LOWER($3) ESCAPE '\\')
       AND ($4::DATE IS NULL OR due_date = $4)
       AND ($5::BOOLEAN IS NULL OR paid = $5)
       AND ($6::BOOLEAN IS NULL OR paid = $6)
       AND ($7::DATE IS NULL OR due_date >= $7)
       AND ($8::DATE IS NULL OR due_date <= $8)";

/// Stable listing order: soonest due first.
const ORDER_CLAUSE: &str = "ORDER BY due_date ASC, id ASC";

/// Provides CRUD operations for expenses.
pub struct ExpenseRepo;

impl ExpenseRepo {
    /// Insert a new expense, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateExpense) -> Result<Expense, sqlx::Error> {
        let query = format!(
            "INSERT INTO expenses (name, expense_type, amount, due_date, paid, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(&input.name)
            .bind(&input.expense_type)
            .bind(input.amount)
            .bind(input.due_date)
            .bind(input.paid)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an expense by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses WHERE id = $1");
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of expenses matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &ExpenseFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM expenses {FILTER_CLAUSE} {ORDER_CLAUSE} LIMIT $9 OFFSET $10"
        );
        bind_filter_as(sqlx::query_as::<_, Expense>(&query), filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List every expense matching `filter`, without pagination.
    pub async fn list_all(
        pool: &PgPool,
        filter: &ExpenseFilter,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses {FILTER_CLAUSE} {ORDER_CLAUSE}");
        bind_filter_as(sqlx::query_as::<_, Expense>(&query), filter)
            .fetch_all(pool)
            .await
    }

    /// Count the expenses matching `filter`.
    pub async fn count(pool: &PgPool, filter: &ExpenseFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM expenses {FILTER_CLAUSE}");
        bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter)
            .fetch_one(pool)
            .await
    }

    /// Update an expense. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!(
            "UPDATE expenses SET
                name = COALESCE($2, name),
                expense_type = COALESCE($3, expense_type),
                amount = COALESCE($4, amount),
                due_date = COALESCE($5, due_date),
                paid = COALESCE($6, paid),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.expense_type)
            .bind(input.amount)
            .bind(input.due_date)
            .bind(input.paid)
            .fetch_optional(pool)
            .await
    }

    /// Flip the stored `paid` flag. Returns `None` if the row does not exist.
    pub async fn toggle_paid(pool: &PgPool, id: DbId) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!(
            "UPDATE expenses SET paid = NOT paid, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an expense by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Escape `LIKE` metacharacters and append the prefix wildcard.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn bind_filter_as<'q>(
    query: QueryAs<'q, Postgres, Expense, PgArguments>,
    filter: &ExpenseFilter,
) -> QueryAs<'q, Postgres, Expense, PgArguments> {
    let window = filter.status;
    query
        .bind(filter.user_id)
        .bind(filter.expense_type.clone())
        .bind(filter.name_prefix.as_deref().map(like_prefix))
        .bind(filter.due_on)
        .bind(filter.paid)
        .bind(window.map(|w| w.paid))
        .bind(window.and_then(|w| w.due_from))
        .bind(window.and_then(|w| w.due_to))
}

fn bind_filter_scalar<'q>(
    query: QueryScalar<'q, Postgres, i64, PgArguments>,
    filter: &ExpenseFilter,
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    let window = filter.status;
    query
        .bind(filter.user_id)
        .bind(filter.expense_type.clone())
        .bind(filter.name_prefix.as_deref().map(like_prefix))
        .bind(filter.due_on)
        .bind(filter.paid)
        .bind(window.map(|w| w.paid))
        .bind(window.and_then(|w| w.due_from))
        .bind(window.and_then(|w| w.due_to))
}
