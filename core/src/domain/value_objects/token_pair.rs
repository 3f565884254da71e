//! Token pair issued on successful authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access and refresh tokens with their expirations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Access token expiration timestamp
    pub access_expires_at: DateTime<Utc>,

    /// Opaque refresh token (lookup key only, carries no claims)
    pub refresh_token: String,

    /// Refresh token expiration timestamp
    pub refresh_expires_at: DateTime<Utc>,
}
