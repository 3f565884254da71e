//! In-memory implementation of `AccountRepository` for tests and local use

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::UserAccount;
use crate::domain::entities::user_token::UserTokenType;
use crate::errors::{AuthError, DomainError};

use super::repository::AccountRepository;

/// In-memory account repository with unit-of-work semantics
///
/// Staged inserts and updates become visible only after `save_changes`,
/// mirroring how a change-tracking ORM behaves. A forced save result can
/// be injected to exercise persistence-failure paths.
pub struct InMemoryAccountRepository {
    committed: Arc<RwLock<HashMap<i64, UserAccount>>>,
    staged: Arc<RwLock<Vec<UserAccount>>>,
    next_id: AtomicI64,
    forced_save_result: Arc<RwLock<Option<i64>>>,
}

impl InMemoryAccountRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            committed: Arc::new(RwLock::new(HashMap::new())),
            staged: Arc::new(RwLock::new(Vec::new())),
            next_id: AtomicI64::new(1),
            forced_save_result: Arc::new(RwLock::new(None)),
        }
    }

    /// Force the next `save_changes` calls to return `result` instead of
    /// the real affected count
    pub async fn force_save_result(&self, result: Option<i64>) {
        *self.forced_save_result.write().await = result;
    }

    /// Number of committed accounts
    pub async fn count(&self) -> usize {
        self.committed.read().await.len()
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_phone(
        &self,
        phone_number: &str,
        include_tokens: bool,
    ) -> Result<Option<UserAccount>, DomainError> {
        let committed = self.committed.read().await;
        let mut account = committed
            .values()
            .find(|a| a.phone_number() == phone_number)
            .cloned();

        if !include_tokens {
            if let Some(ref mut account) = account {
                account.strip_tokens();
            }
        }

        Ok(account)
    }

    async fn find_by_token(
        &self,
        token_type: UserTokenType,
        value: &str,
    ) -> Result<Option<UserAccount>, DomainError> {
        let committed = self.committed.read().await;
        Ok(committed
            .values()
            .find(|a| {
                a.tokens()
                    .iter()
                    .any(|t| t.token_type() == token_type && t.value() == value)
            })
            .cloned())
    }

    async fn insert(&self, mut account: UserAccount) -> Result<UserAccount, DomainError> {
        let committed = self.committed.read().await;
        if committed
            .values()
            .any(|a| a.phone_number() == account.phone_number())
        {
            return Err(AuthError::DuplicateAccount.into());
        }
        drop(committed);

        account.assign_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.staged.write().await.push(account.clone());
        Ok(account)
    }

    async fn update(&self, account: UserAccount) -> Result<(), DomainError> {
        self.staged.write().await.push(account);
        Ok(())
    }

    async fn save_changes(&self) -> Result<i64, DomainError> {
        if let Some(forced) = *self.forced_save_result.read().await {
            self.staged.write().await.clear();
            return Ok(forced);
        }

        let mut staged = self.staged.write().await;
        let mut committed = self.committed.write().await;
        let affected = staged.len() as i64;

        for account in staged.drain(..) {
            committed.insert(account.id(), account);
        }

        Ok(affected)
    }
}
