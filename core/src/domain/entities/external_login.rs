//! Third-party identity bindings owned by a user account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainResult, ValidationError};

/// External login provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginProviderType {
    WeChatMiniProgram,
}

/// Binding between a user account and a third-party identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalLogin {
    provider: LoginProviderType,
    provider_key: String,
    nick_name: Option<String>,
    avatar_url: Option<String>,
    is_unbound: bool,
    bound_at: DateTime<Utc>,
    unbound_at: Option<DateTime<Utc>>,
    last_login_at: Option<DateTime<Utc>>,
}

impl ExternalLogin {
    /// Creates a new binding
    ///
    /// # Errors
    ///
    /// Returns a validation error when `provider_key` is empty.
    pub fn new(provider: LoginProviderType, provider_key: impl Into<String>) -> DomainResult<Self> {
        let provider_key = provider_key.into();
        if provider_key.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "provider key".to_string(),
            }
            .into());
        }

        Ok(Self {
            provider,
            provider_key,
            nick_name: None,
            avatar_url: None,
            is_unbound: false,
            bound_at: Utc::now(),
            unbound_at: None,
            last_login_at: None,
        })
    }

    pub fn provider(&self) -> LoginProviderType {
        self.provider
    }

    pub fn provider_key(&self) -> &str {
        &self.provider_key
    }

    pub fn nick_name(&self) -> Option<&str> {
        self.nick_name.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn is_unbound(&self) -> bool {
        self.is_unbound
    }

    pub fn bound_at(&self) -> DateTime<Utc> {
        self.bound_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Updates the profile data mirrored from the provider
    pub fn update_profile(&mut self, nick_name: Option<String>, avatar_url: Option<String>) {
        self.nick_name = nick_name;
        self.avatar_url = avatar_url;
    }

    /// Records a login through this binding
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    /// Marks the binding as unbound (soft removal)
    pub fn unbind(&mut self) {
        self.is_unbound = true;
        self.unbound_at = Some(Utc::now());
    }

    /// Restores a previously unbound binding
    pub fn rebind(&mut self) {
        self.is_unbound = false;
        self.unbound_at = None;
        self.bound_at = Utc::now();
    }
}
