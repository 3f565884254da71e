//! Domain-specific error types for authentication and related operations
//!
//! Each error family is its own `thiserror` enum; all of them bridge into
//! the umbrella [`DomainError`](super::DomainError). Business-rule failures
//! travel through the result channel and never surface as panics.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("An account with the given phone number already exists")]
    DuplicateAccount,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account is locked out")]
    AccountLocked,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Registration is currently disabled")]
    RegistrationDisabled,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid or expired refresh token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Lock duration must be positive")]
    InvalidLockDuration,

    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation { rule: String },
}
