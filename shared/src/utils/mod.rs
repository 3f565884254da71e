//! Utility functions shared across server modules.

pub mod phone;
pub mod secret;

pub use phone::{is_valid_phone_number, mask_phone};
pub use secret::hide_secret;
