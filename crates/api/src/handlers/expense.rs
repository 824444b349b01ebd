//! Handlers for the `/expenses` resource.
//!
//! Every response carries a `status` derived from the stored `paid` flag,
//! the due date, today's local date and the due-soon threshold. The
//! threshold comes from `?dueSoonDays=` or falls back to the server default.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use duebook_core::due_status::{
    derive_status, today_local, validate_threshold, DueStatus, StatusSummary,
};
use duebook_core::error::CoreError;
use duebook_core::pagination::{clamp_limit, clamp_offset};
use duebook_core::types::{DbId, Money};
use duebook_core::validation::{
    normalize_text, validate_amount, validate_expense_name, validate_expense_type,
};
use duebook_db::models::expense::{CreateExpense, Expense, ExpenseFilter, UpdateExpense};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{ExpenseListParams, ThresholdParams};
use crate::response::PagedResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /expenses`.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
}

/// An expense together with its derived status.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    #[serde(flatten)]
    pub expense: Expense,
    pub status: DueStatus,
}

impl ExpenseResponse {
    pub fn new(expense: Expense, today: NaiveDate, threshold: u32) -> Self {
        let status = derive_status(expense.paid, expense.due_date, today, threshold);
        Self { expense, status }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/expenses
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ExpenseListParams>,
) -> AppResult<Json<PagedResponse<ExpenseResponse>>> {
    let page = list_page(&state, params, None).await?;
    Ok(Json(page))
}

/// GET /api/v1/expenses/summary
///
/// Counts and totals per status over every expense matching the filters.
/// `status`, `limit` and `offset` are ignored.
pub async fn summary(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ExpenseListParams>,
) -> AppResult<Json<StatusSummary>> {
    let threshold = resolve_threshold(&state, params.due_soon_days)?;
    let today = today_local();
    let filter = base_filter(&params);

    let expenses = state.store.list_all_expenses(&filter).await?;
    let summary = StatusSummary::from_items(
        expenses
            .iter()
            .map(|e| (derive_status(e.paid, e.due_date, today, threshold), e.amount)),
        threshold,
    );
    Ok(Json(summary))
}

/// GET /api/v1/expenses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<ThresholdParams>,
) -> AppResult<Json<ExpenseResponse>> {
    let threshold = resolve_threshold(&state, params.due_soon_days)?;
    let expense = state
        .store
        .find_expense(id)
        .await?
        .ok_or(AppError::Core(CoreError::expense_not_found(id)))?;
    Ok(Json(ExpenseResponse::new(expense, today_local(), threshold)))
}

/// POST /api/v1/expenses
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateExpenseRequest>,
) -> AppResult<(StatusCode, Json<ExpenseResponse>)> {
    let name = normalize_text(&input.name);
    let expense_type = normalize_text(&input.expense_type);
    validate_expense_name(&name)?;
    validate_expense_type(&expense_type)?;
    validate_amount(input.amount)?;

    let create = CreateExpense {
        name,
        expense_type,
        amount: input.amount,
        due_date: input.due_date,
        paid: input.paid,
        user_id: user.user_id,
    };
    let expense = state.store.create_expense(&create).await?;

    tracing::info!(
        expense_id = expense.id,
        user_id = user.user_id,
        due_date = %expense.due_date,
        "Expense created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ExpenseResponse::new(
            expense,
            today_local(),
            state.config.due_soon_days,
        )),
    ))
}

/// PUT /api/v1/expenses/{id}
///
/// Partial update: only fields present in the body are changed.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExpense>,
) -> AppResult<Json<ExpenseResponse>> {
    let input = normalize_update(input)?;
    let expense = state
        .store
        .update_expense(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::expense_not_found(id)))?;

    tracing::info!(expense_id = id, user_id = user.user_id, "Expense updated");

    Ok(Json(ExpenseResponse::new(
        expense,
        today_local(),
        state.config.due_soon_days,
    )))
}

/// POST /api/v1/expenses/{id}/toggle-paid
pub async fn toggle_paid(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ExpenseResponse>> {
    let expense = state
        .store
        .toggle_paid(id)
        .await?
        .ok_or(AppError::Core(CoreError::expense_not_found(id)))?;

    tracing::info!(
        expense_id = id,
        user_id = user.user_id,
        paid = expense.paid,
        "Expense paid flag toggled"
    );

    Ok(Json(ExpenseResponse::new(
        expense,
        today_local(),
        state.config.due_soon_days,
    )))
}

/// DELETE /api/v1/expenses/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.store.delete_expense(id).await? {
        return Err(AppError::Core(CoreError::expense_not_found(id)));
    }
    tracing::info!(expense_id = id, user_id = user.user_id, "Expense deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run a filtered, paginated listing. `owner` overrides `params.user_id`.
pub(crate) async fn list_page(
    state: &AppState,
    params: ExpenseListParams,
    owner: Option<DbId>,
) -> AppResult<PagedResponse<ExpenseResponse>> {
    let threshold = resolve_threshold(state, params.due_soon_days)?;
    let today = today_local();
    let mut filter = build_filter(&params, today, threshold)?;
    if owner.is_some() {
        filter.user_id = owner;
    }
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let total = state.store.count_expenses(&filter).await?;
    let data = state
        .store
        .list_expenses(&filter, limit, offset)
        .await?
        .into_iter()
        .map(|expense| ExpenseResponse::new(expense, today, threshold))
        .collect();

    Ok(PagedResponse {
        data,
        total,
        limit,
        offset,
    })
}

fn resolve_threshold(state: &AppState, requested: Option<i64>) -> AppResult<u32> {
    match requested {
        Some(days) => Ok(validate_threshold(days)?),
        None => Ok(state.config.due_soon_days),
    }
}

/// Column filters only; `status` is left unset and unparsed.
fn base_filter(params: &ExpenseListParams) -> ExpenseFilter {
    ExpenseFilter {
        user_id: params.user_id,
        expense_type: non_blank(params.expense_type.as_deref()),
        name_prefix: non_blank(params.name.as_deref()),
        due_on: params.due_date,
        paid: params.paid,
        status: None,
    }
}

fn build_filter(
    params: &ExpenseListParams,
    today: NaiveDate,
    threshold: u32,
) -> AppResult<ExpenseFilter> {
    let status = params
        .status
        .as_deref()
        .map(DueStatus::from_str_value)
        .transpose()
        .map_err(AppError::BadRequest)?;

    Ok(ExpenseFilter {
        status: status.map(|s| s.window(today, threshold)),
        ..base_filter(params)
    })
}

/// Trimmed value, or `None` when absent or blank.
fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(normalize_text).filter(|v| !v.is_empty())
}

fn normalize_update(input: UpdateExpense) -> AppResult<UpdateExpense> {
    let name = input.name.as_deref().map(normalize_text);
    if let Some(name) = &name {
        validate_expense_name(name)?;
    }
    let expense_type = input.expense_type.as_deref().map(normalize_text);
    if let Some(expense_type) = &expense_type {
        validate_expense_type(expense_type)?;
    }
    if let Some(amount) = input.amount {
        validate_amount(amount)?;
    }
    Ok(UpdateExpense {
        name,
        expense_type,
        ..input
    })
}
