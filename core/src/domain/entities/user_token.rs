//! Purpose-tagged secrets owned by a user account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainResult, ValidationError};

/// Purpose of a [`UserToken`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserTokenType {
    ResetPassword,
    EmailVerification,
    PhoneVerification,
    TwoFactor,
    RefreshToken,
}

/// A token associated with a user account, such as for password reset,
/// email verification, or refresh-token exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserToken {
    token_type: UserTokenType,
    value: String,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl UserToken {
    /// Creates a new token
    ///
    /// # Errors
    ///
    /// Returns a validation error when `value` is empty.
    pub fn new(
        token_type: UserTokenType,
        value: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "token value".to_string(),
            }
            .into());
        }

        Ok(Self {
            token_type,
            value,
            expires_at,
            created_at: Utc::now(),
        })
    }

    pub fn token_type(&self) -> UserTokenType {
        self.token_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Checks whether the token has passed its expiry
    ///
    /// Tokens without an expiry never expire.
    pub fn has_expired(&self) -> bool {
        matches!(self.expires_at, Some(expiry) if expiry < Utc::now())
    }

    pub(crate) fn update_value(&mut self, value: String) {
        self.value = value;
    }

    pub(crate) fn set_expiry(&mut self, expiry: DateTime<Utc>) {
        self.expires_at = Some(expiry);
    }
}
