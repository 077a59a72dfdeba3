use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

use crate::account::AccountType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Type must be SAVINGS or CURRENT")]
    InvalidAccountType,
    #[error("Please enter valid amount")]
    InvalidAmount,
    #[error("Cannot transfer to your own account")]
    SelfTransfer,
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

/// Only checks for an `@`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !email.contains('@') {
        return Err(ValidationError::EmailRequired);
    }
    Ok(())
}

pub fn validate_account_type(account_type: &str) -> Result<AccountType, ValidationError> {
    if account_type.eq_ignore_ascii_case("SAVINGS") {
        Ok(AccountType::Savings)
    } else if account_type.eq_ignore_ascii_case("CURRENT") {
        Ok(AccountType::Current)
    } else {
        Err(ValidationError::InvalidAccountType)
    }
}

/// Missing, zero and negative amounts are all rejected.
pub fn validate_amount(amount: Option<Decimal>) -> Result<Decimal, ValidationError> {
    match amount {
        Some(amount) if amount > Decimal::zero() => Ok(amount),
        _ => Err(ValidationError::InvalidAmount),
    }
}
