//! Shared utilities and common types for the Keystone backend
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Operation result structure
//! - Utility functions (phone validation, secret masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::JwtConfig;
pub use types::OperationResult;
pub use utils::{phone, secret};
