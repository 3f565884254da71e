//! Configuration types shared across server modules.

pub mod auth;

pub use auth::JwtConfig;
