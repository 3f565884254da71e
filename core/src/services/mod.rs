//! Business services containing domain logic and use cases.

pub mod auth;
pub mod credential;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, NoopOtpVerifier, OtpVerifier};
pub use credential::PasswordHasher;
pub use token::JwtProvider;
