//! Login outcome value object returned by the authentication service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{UserAccount, UserStatus};

use super::token_pair::TokenPair;

/// Safe projection of a user account for callers
///
/// Never carries the credential or lockout internals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: i64,
    pub phone_number: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub status: UserStatus,
}

impl From<&UserAccount> for AccountSummary {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id(),
            phone_number: account.phone_number().to_string(),
            email: account.email().map(str::to_string),
            display_name: account.display_name().map(str::to_string),
            status: account.status(),
        }
    }
}

/// Outcome of a login or refresh operation
///
/// Exactly one of two successful shapes: an authenticated outcome with
/// tokens and account data, or an OTP challenge asking the caller to
/// re-prompt. The challenge is a legitimate intermediate state, not a
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Whether authentication completed
    pub success: bool,

    /// Whether the caller must supply an OTP code and retry
    pub needs_otp: bool,

    /// Authenticated account (present when `success`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountSummary>,

    /// JWT access token (present when `success`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Access token expiration (present when `success`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_expires_at: Option<DateTime<Utc>>,

    /// Refresh token (present when `success`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Refresh token expiration (present when `success`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_expires_at: Option<DateTime<Utc>>,
}

impl LoginOutcome {
    /// Creates an authenticated outcome carrying tokens and account data
    pub fn authenticated(account: AccountSummary, tokens: TokenPair) -> Self {
        Self {
            success: true,
            needs_otp: false,
            account: Some(account),
            access_token: Some(tokens.access_token),
            access_expires_at: Some(tokens.access_expires_at),
            refresh_token: Some(tokens.refresh_token),
            refresh_expires_at: Some(tokens.refresh_expires_at),
        }
    }

    /// Creates an OTP challenge outcome; no tokens are issued
    pub fn otp_required() -> Self {
        Self {
            success: false,
            needs_otp: true,
            account: None,
            access_token: None,
            access_expires_at: None,
            refresh_token: None,
            refresh_expires_at: None,
        }
    }
}
