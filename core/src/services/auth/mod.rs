//! Authentication service module
//!
//! Orchestrates registration, password login with lockout handling, and
//! refresh-token rotation over the account repository, the password
//! hasher, and the token provider.

mod config;
mod otp;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use otp::{NoopOtpVerifier, OtpVerifier};
pub use service::AuthService;
