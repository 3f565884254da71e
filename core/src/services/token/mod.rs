//! Token issuance module
//!
//! Signs short-lived JWT access tokens and mints opaque refresh tokens,
//! pairing them for the login and refresh flows.

mod claims;
mod provider;

pub use claims::Claims;
pub use provider::JwtProvider;
