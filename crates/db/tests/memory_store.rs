//! Integration tests for the in-memory backend through the `Store` handle.
//!
//! These need no database and exercise the same filter semantics the
//! Postgres repository encodes in SQL.

use std::str::FromStr;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use duebook_core::due_status::DueStatus;
use duebook_core::types::{DbId, Money};
use duebook_db::models::expense::{CreateExpense, ExpenseFilter, UpdateExpense};
use duebook_db::models::user::CreateUser;
use duebook_db::{Store, StoreError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn new_expense(user_id: DbId, name: &str, due: &str, paid: bool) -> CreateExpense {
    CreateExpense {
        name: name.to_string(),
        expense_type: "Casa".to_string(),
        amount: Money::from_str("100.00").unwrap(),
        due_date: date(due),
        paid,
        user_id,
    }
}

async fn seed(store: &Store) -> DbId {
    let user = store
        .create_user(&CreateUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap();

    for (name, due, paid) in [
        ("Conta de Luz", "2024-01-05", false),
        ("Internet", "2024-01-08", false),
        ("Academia", "2024-01-12", false),
        ("Conta de Agua", "2024-01-15", false),
        ("Aluguel", "2024-01-25", false),
        ("Sofa", "2024-01-01", true),
    ] {
        store
            .create_expense(&new_expense(user.id, name, due, paid))
            .await
            .unwrap();
    }
    user.id
}

// ---------------------------------------------------------------------------
// Expenses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_find_round_trips() {
    let store = Store::memory();
    let user_id = seed(&store).await;

    let created = store
        .create_expense(&new_expense(user_id, "Seguro", "2024-02-01", false))
        .await
        .unwrap();
    let found = store.find_expense(created.id).await.unwrap().unwrap();

    assert_eq!(found, created);
    assert_eq!(found.amount, Money::from_str("100.00").unwrap());
    assert_eq!(found.due_date, date("2024-02-01"));
}

#[tokio::test]
async fn list_orders_by_due_date() {
    let store = Store::memory();
    seed(&store).await;

    let all = store
        .list_expenses(&ExpenseFilter::default(), 100, 0)
        .await
        .unwrap();
    let names: Vec<&str> = all.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        ["Sofa", "Conta de Luz", "Internet", "Academia", "Conta de Agua", "Aluguel"]
    );
}

#[tokio::test]
async fn list_paginates() {
    let store = Store::memory();
    seed(&store).await;

    let page = store
        .list_expenses(&ExpenseFilter::default(), 2, 2)
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].name, "Internet");
    assert_eq!(page[1].name, "Academia");

    let total = store.count_expenses(&ExpenseFilter::default()).await.unwrap();
    assert_eq!(total, 6);
}

#[tokio::test]
async fn filter_by_derived_status_window() {
    let store = Store::memory();
    seed(&store).await;
    let today = date("2024-01-10");

    let count_for = |status: DueStatus| ExpenseFilter {
        status: Some(status.window(today, 5)),
        ..ExpenseFilter::default()
    };

    assert_eq!(store.count_expenses(&count_for(DueStatus::Overdue)).await.unwrap(), 2);
    assert_eq!(store.count_expenses(&count_for(DueStatus::DueSoon)).await.unwrap(), 2);
    assert_eq!(store.count_expenses(&count_for(DueStatus::Due)).await.unwrap(), 1);
    assert_eq!(store.count_expenses(&count_for(DueStatus::Paid)).await.unwrap(), 1);
}

#[tokio::test]
async fn filter_by_name_prefix_is_case_insensitive() {
    let store = Store::memory();
    seed(&store).await;

    let filter = ExpenseFilter {
        name_prefix: Some("conta".to_string()),
        ..ExpenseFilter::default()
    };
    let found = store.list_all_expenses(&filter).await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|e| e.name.starts_with("Conta")));
}

#[tokio::test]
async fn update_applies_only_given_fields() {
    let store = Store::memory();
    let user_id = seed(&store).await;
    let created = store
        .create_expense(&new_expense(user_id, "Seguro", "2024-02-01", false))
        .await
        .unwrap();

    let update = UpdateExpense {
        amount: Some(Money::from_str("350.00").unwrap()),
        ..UpdateExpense::default()
    };
    let updated = store.update_expense(created.id, &update).await.unwrap().unwrap();

    assert_eq!(updated.amount, Money::from_str("350.00").unwrap());
    assert_eq!(updated.name, "Seguro");
    assert_eq!(updated.due_date, created.due_date);
}

#[tokio::test]
async fn update_missing_returns_none() {
    let store = Store::memory();
    let result = store
        .update_expense(42, &UpdateExpense::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn toggle_paid_flips_flag() {
    let store = Store::memory();
    let user_id = seed(&store).await;
    let created = store
        .create_expense(&new_expense(user_id, "Seguro", "2024-02-01", false))
        .await
        .unwrap();

    let toggled = store.toggle_paid(created.id).await.unwrap().unwrap();
    assert!(toggled.paid);
    let toggled = store.toggle_paid(created.id).await.unwrap().unwrap();
    assert!(!toggled.paid);
}

#[tokio::test]
async fn delete_removes_record() {
    let store = Store::memory();
    let user_id = seed(&store).await;
    let created = store
        .create_expense(&new_expense(user_id, "Seguro", "2024-02-01", false))
        .await
        .unwrap();

    assert!(store.delete_expense(created.id).await.unwrap());
    assert!(store.find_expense(created.id).await.unwrap().is_none());
    assert!(!store.delete_expense(created.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let store = Store::memory();
    seed(&store).await;

    let result = store
        .create_user(&CreateUser {
            name: "Outra Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "hash".to_string(),
        })
        .await;
    assert_matches!(result, Err(StoreError::Duplicate(_)));
}

#[tokio::test]
async fn find_user_by_email() {
    let store = Store::memory();
    let user_id = seed(&store).await;

    let user = store
        .find_user_by_email("ana@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.id, user_id);
    assert!(store.find_user_by_email("nobody@example.com").await.unwrap().is_none());
}
