//! Input validation for expenses and users.
//!
//! Validators take already-trimmed values where trimming matters; the
//! [`normalize_text`] helper does that for handlers and stores alike.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::Money;

/// Maximum length of an expense name, expense type or user name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Decimal places kept for amounts (`NUMERIC(12,2)`).
pub const AMOUNT_SCALE: u32 = 2;

/// Digits allowed before the decimal point (`NUMERIC(12,2)`).
pub const AMOUNT_INTEGER_DIGITS: u32 = 10;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Trim surrounding whitespace from user-entered text.
pub fn normalize_text(value: &str) -> String {
    value.trim().to_string()
}

pub fn validate_expense_name(name: &str) -> Result<(), CoreError> {
    validate_label("name", name)
}

pub fn validate_expense_type(expense_type: &str) -> Result<(), CoreError> {
    validate_label("type", expense_type)
}

pub fn validate_user_name(name: &str) -> Result<(), CoreError> {
    validate_label("name", name)
}

/// Amounts may be zero but never negative, and must fit `NUMERIC(12,2)`.
pub fn validate_amount(amount: Money) -> Result<(), CoreError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CoreError::Validation(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    if amount.scale() > AMOUNT_SCALE {
        return Err(CoreError::Validation(format!(
            "amount must have at most {AMOUNT_SCALE} decimal places, got {amount}"
        )));
    }
    if amount.trunc() >= Money::from(10_i64.pow(AMOUNT_INTEGER_DIGITS)) {
        return Err(CoreError::Validation(format!(
            "amount must be below 10^{AMOUNT_INTEGER_DIGITS}, got {amount}"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

fn validate_label(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn expense_name_rules() {
        assert!(validate_expense_name("Conta de Luz").is_ok());
        assert_matches!(validate_expense_name("   "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_expense_name(&"x".repeat(MAX_NAME_LENGTH + 1)),
            Err(CoreError::Validation(msg)) if msg.contains("at most 100")
        );
        assert!(validate_expense_name(&"x".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn multibyte_names_count_characters() {
        let name = "ç".repeat(MAX_NAME_LENGTH);
        assert!(validate_expense_type(&name).is_ok());
    }

    #[test]
    fn amount_rules() {
        assert!(validate_amount(Money::ZERO).is_ok());
        assert!(validate_amount(Money::from_str("2200.00").unwrap()).is_ok());
        assert_matches!(
            validate_amount(Money::from_str("-0.01").unwrap()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn amount_must_fit_two_decimal_places() {
        assert!(validate_amount(Money::from_str("10.5").unwrap()).is_ok());
        assert!(validate_amount(Money::from_str("9999999999.99").unwrap()).is_ok());
        assert_matches!(
            validate_amount(Money::from_str("10.123456789").unwrap()),
            Err(CoreError::Validation(msg)) if msg.contains("at most 2 decimal places")
        );
        assert_matches!(
            validate_amount(Money::from_str("10000000000").unwrap()),
            Err(CoreError::Validation(msg)) if msg.contains("below 10^10")
        );
    }

    #[test]
    fn email_rules() {
        assert!(validate_email("teste@gmail.com").is_ok());
        assert_matches!(validate_email("not-an-email"), Err(CoreError::Validation(_)));
        assert_matches!(validate_email(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn password_rules() {
        assert!(validate_password("123456").is_ok());
        assert_matches!(
            validate_password("12345"),
            Err(CoreError::Validation(msg)) if msg.contains("at least 6")
        );
    }

    #[test]
    fn normalize_trims() {
        assert_eq!(normalize_text("  Aluguel \n"), "Aluguel");
    }
}
