//! JWT claim set carried by access tokens.

use serde::{Deserialize, Serialize};

/// Claims embedded in every access token
///
/// `sub` carries the account id and `phone_number` the registered phone,
/// so resource servers can identify the caller without a lookup. Any
/// caller-supplied extra claims are flattened alongside the registered set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the account id as a string
    pub sub: String,
    /// Registered phone number of the account
    pub phone_number: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Not-before, seconds since the epoch
    pub nbf: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Unique token id
    pub jti: String,
    /// Additional caller-supplied claims
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
