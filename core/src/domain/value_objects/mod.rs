//! Value objects exchanged between the core and its callers.

pub mod login_outcome;
pub mod requests;
pub mod token_pair;

pub use login_outcome::{AccountSummary, LoginOutcome};
pub use requests::{LoginRequest, RegistrationRequest};
pub use token_pair::TokenPair;
