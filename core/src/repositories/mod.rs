//! Persistence collaborator contracts consumed by the core.

pub mod account;

pub use account::{AccountRepository, InMemoryAccountRepository};
