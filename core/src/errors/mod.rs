//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use ks_shared::OperationResult;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Persistence failure: {message}")]
    Persistence { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Stable error code for programmatic handling by callers
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Persistence { .. } => "PERSISTENCE_FAILURE",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(err) => match err {
                AuthError::InvalidInput { .. } => "INVALID_INPUT",
                AuthError::DuplicateAccount => "DUPLICATE_ACCOUNT",
                AuthError::AccountNotFound => "ACCOUNT_NOT_FOUND",
                AuthError::AccountLocked => "ACCOUNT_LOCKED",
                AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
                AuthError::RegistrationDisabled => "REGISTRATION_DISABLED",
            },
            DomainError::Token(err) => match err {
                TokenError::InvalidToken => "INVALID_TOKEN",
                TokenError::TokenGenerationFailed => "INTERNAL_ERROR",
            },
            DomainError::Validation(_) => "INVALID_INPUT",
        }
    }
}

/// Convert an internal result into the wrapper returned by application services
pub fn into_operation_result<T>(result: DomainResult<T>) -> OperationResult<T> {
    match result {
        Ok(data) => OperationResult::success(data),
        Err(err) => OperationResult::failure(err.error_code(), err.to_string()),
    }
}
