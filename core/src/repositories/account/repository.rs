//! Account repository trait defining the persistence collaborator contract.
//!
//! The core follows a unit-of-work discipline: an operation loads one
//! account, mutates it in memory, stages it with [`insert`] or [`update`],
//! and commits everything with a single [`save_changes`] call. The
//! persistence layer must treat that sequence as one atomic unit;
//! concurrent requests against the same account rely on its optimistic
//! concurrency or row locking.
//!
//! [`insert`]: AccountRepository::insert
//! [`update`]: AccountRepository::update
//! [`save_changes`]: AccountRepository::save_changes

use async_trait::async_trait;

use crate::domain::entities::user::UserAccount;
use crate::domain::entities::user_token::UserTokenType;
use crate::errors::DomainError;

/// Repository contract for user-account persistence
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by phone number
    ///
    /// # Arguments
    /// * `phone_number` - The account's registered phone number
    /// * `include_tokens` - Whether to load the owned token collection;
    ///   the core never lazily loads mid-computation, so callers that need
    ///   tokens must ask for them upfront
    ///
    /// # Returns
    /// * `Ok(Some(UserAccount))` - Account found
    /// * `Ok(None)` - No account with the given phone number
    /// * `Err(DomainError)` - Storage error
    async fn find_by_phone(
        &self,
        phone_number: &str,
        include_tokens: bool,
    ) -> Result<Option<UserAccount>, DomainError>;

    /// Find the account owning a token of the given type and value
    ///
    /// Token values of a given type act as a secondary key; the account is
    /// always returned with its tokens loaded.
    async fn find_by_token(
        &self,
        token_type: UserTokenType,
        value: &str,
    ) -> Result<Option<UserAccount>, DomainError>;

    /// Stage a new account for insertion, returning it with its assigned id
    ///
    /// The insert is not visible to lookups until [`save_changes`] commits.
    ///
    /// [`save_changes`]: AccountRepository::save_changes
    async fn insert(&self, account: UserAccount) -> Result<UserAccount, DomainError>;

    /// Stage an updated account, replacing the stored state on commit
    async fn update(&self, account: UserAccount) -> Result<(), DomainError>;

    /// Commit all staged changes, returning the affected row count
    ///
    /// A negative count signals a persistence failure; zero means there was
    /// nothing to save.
    async fn save_changes(&self) -> Result<i64, DomainError>;
}
