//! User account aggregate enforcing login, lockout, and token invariants.
//!
//! All state transitions go through named operations; fields are never
//! mutated directly from outside the aggregate. Transitions are pure
//! in-memory mutations, persistence is the orchestrator's responsibility.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainResult, ValidationError};

use super::external_login::{ExternalLogin, LoginProviderType};
use super::user_token::{UserToken, UserTokenType};

/// Consecutive failed logins after which the account is risk-flagged
pub const MAX_LOGIN_ATTEMPTS: u32 = 5;

/// Default lifetime applied when a token is replaced without an expiry
const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Inactive,
    Active,
    Frozen,
}

/// User account aggregate root
///
/// Holds identity, credential, lockout counters, and the owned collections
/// of purpose-tagged tokens and external login bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    id: i64,
    phone_number: String,
    email: Option<String>,
    password_hash: String,
    salt: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    display_name: Option<String>,
    lockout_enabled: bool,
    lockout_end: Option<DateTime<Utc>>,
    access_failed_count: u32,
    force_otp_on_login: bool,
    status: UserStatus,
    tokens: Vec<UserToken>,
    external_logins: Vec<ExternalLogin>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Creates a new account from registration data
    ///
    /// The id stays 0 until the persistence layer assigns one on insert.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the phone number or password hash
    /// is empty.
    pub fn register(
        phone_number: impl Into<String>,
        password_hash: impl Into<String>,
        salt: Option<String>,
    ) -> DomainResult<Self> {
        let phone_number = phone_number.into();
        if phone_number.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "phone number".to_string(),
            }
            .into());
        }

        let password_hash = password_hash.into();
        if password_hash.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password hash".to_string(),
            }
            .into());
        }

        let now = Utc::now();
        Ok(Self {
            id: 0,
            phone_number,
            email: None,
            password_hash,
            salt,
            first_name: None,
            last_name: None,
            display_name: None,
            lockout_enabled: false,
            lockout_end: None,
            access_failed_count: 0,
            force_otp_on_login: false,
            status: UserStatus::Active,
            tokens: Vec::new(),
            external_logins: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // Accessors

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn lockout_enabled(&self) -> bool {
        self.lockout_enabled
    }

    pub fn lockout_end(&self) -> Option<DateTime<Utc>> {
        self.lockout_end
    }

    pub fn access_failed_count(&self) -> u32 {
        self.access_failed_count
    }

    pub fn force_otp_on_login(&self) -> bool {
        self.force_otp_on_login
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn tokens(&self) -> &[UserToken] {
        &self.tokens
    }

    pub fn external_logins(&self) -> &[ExternalLogin] {
        &self.external_logins
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assigns the persistence-generated id. Called by repository
    /// implementations on insert.
    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    /// Drops the owned token collection. Used by repository implementations
    /// when a caller asked for the account without its tokens loaded.
    pub(crate) fn strip_tokens(&mut self) {
        self.tokens.clear();
    }

    // Profile and credential

    /// Updates the profile fields
    pub fn update_profile(
        &mut self,
        first_name: Option<String>,
        last_name: Option<String>,
        display_name: Option<String>,
    ) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.display_name = display_name;
        self.touch();
    }

    /// Updates the email address
    pub fn update_email(&mut self, email: Option<String>) {
        self.email = email;
        self.touch();
    }

    /// Replaces the stored credential
    ///
    /// # Errors
    ///
    /// Returns a validation error when the new hash is empty.
    pub fn change_password(
        &mut self,
        new_password_hash: impl Into<String>,
        new_salt: Option<String>,
    ) -> DomainResult<()> {
        let new_password_hash = new_password_hash.into();
        if new_password_hash.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password hash".to_string(),
            }
            .into());
        }

        self.password_hash = new_password_hash;
        self.salt = new_salt;
        self.touch();
        Ok(())
    }

    /// Updates the account status
    pub fn update_status(&mut self, status: UserStatus) {
        self.status = status;
        self.touch();
    }

    // Lockout state machine

    /// Locks the account until now + `duration`
    ///
    /// # Errors
    ///
    /// Returns a validation error when the duration is zero or negative;
    /// the account state is left unchanged.
    pub fn lock(&mut self, duration: Duration) -> DomainResult<()> {
        if duration <= Duration::zero() {
            return Err(ValidationError::InvalidLockDuration.into());
        }

        self.lockout_enabled = true;
        self.lockout_end = Some(Utc::now() + duration);
        self.touch();
        Ok(())
    }

    /// Clears the lockout and resets the failed-attempt counter
    ///
    /// The risk flag is deliberately left in place: only a fully
    /// successful login clears it.
    pub fn unlock(&mut self) {
        self.lockout_enabled = false;
        self.lockout_end = None;
        self.access_failed_count = 0;
        self.touch();
    }

    /// Whether the account is currently locked out
    pub fn is_locked_out(&self) -> bool {
        self.lockout_enabled
            && matches!(self.lockout_end, Some(end) if end > Utc::now())
    }

    /// Records a failed login attempt, risk-flagging the account once the
    /// counter reaches [`MAX_LOGIN_ATTEMPTS`]
    pub fn record_failed_attempt(&mut self) {
        self.access_failed_count += 1;
        if self.access_failed_count >= MAX_LOGIN_ATTEMPTS {
            self.mark_dangerous_login();
        }
        self.touch();
    }

    /// Records a fully successful login, resetting the counter and clearing
    /// the risk flag
    pub fn record_successful_login(&mut self) {
        self.access_failed_count = 0;
        self.mark_safe_login();
        self.touch();
    }

    fn mark_dangerous_login(&mut self) {
        self.force_otp_on_login = true;
    }

    fn mark_safe_login(&mut self) {
        self.force_otp_on_login = false;
    }

    // Token management

    /// Attaches a token, replacing the value and expiry of an active token
    /// of the same type in place
    ///
    /// At most one active (non-expired) token per type exists at any time.
    /// When replacing, a missing expiry defaults to 24 hours from now.
    pub fn add_or_update_token(&mut self, token: UserToken) -> DomainResult<()> {
        let incoming_expiry = token
            .expires_at()
            .unwrap_or_else(|| Utc::now() + Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS));

        match self
            .tokens
            .iter_mut()
            .find(|t| t.token_type() == token.token_type() && !t.has_expired())
        {
            Some(existing) => {
                existing.update_value(token.value().to_string());
                existing.set_expiry(incoming_expiry);
            }
            None => self.tokens.push(token),
        }

        self.touch();
        Ok(())
    }

    /// Returns the token of the given type, if any
    pub fn token_of_type(&self, token_type: UserTokenType) -> Option<&UserToken> {
        self.tokens.iter().find(|t| t.token_type() == token_type)
    }

    // External login management

    /// Returns the active (not unbound) external login bindings
    pub fn active_external_logins(&self) -> Vec<&ExternalLogin> {
        self.external_logins
            .iter()
            .filter(|e| !e.is_unbound())
            .collect()
    }

    /// Returns the active binding for the given provider, if any
    pub fn external_login(&self, provider: LoginProviderType) -> Option<&ExternalLogin> {
        self.external_logins
            .iter()
            .find(|e| e.provider() == provider && !e.is_unbound())
    }

    /// Binds an external login, updating or rebinding an existing record
    /// for the same provider and key
    pub fn add_or_update_external_login(&mut self, login: ExternalLogin) -> DomainResult<()> {
        match self.external_logins.iter_mut().find(|e| {
            e.provider() == login.provider() && e.provider_key() == login.provider_key()
        }) {
            Some(existing) => {
                if existing.is_unbound() {
                    existing.rebind();
                }
                existing.update_profile(
                    login.nick_name().map(str::to_string),
                    login.avatar_url().map(str::to_string),
                );
                existing.record_login();
            }
            None => self.external_logins.push(login),
        }

        self.touch();
        Ok(())
    }

    /// Unbinds the external login for the given provider
    ///
    /// # Errors
    ///
    /// Fails when no active binding exists, or when removing it would leave
    /// the account without any login method.
    pub fn remove_external_login(&mut self, provider: LoginProviderType) -> DomainResult<()> {
        let has_password_login = !self.password_hash.trim().is_empty();
        let other_active_logins = self
            .external_logins
            .iter()
            .filter(|e| e.provider() != provider && !e.is_unbound())
            .count();

        let binding = self
            .external_logins
            .iter_mut()
            .find(|e| e.provider() == provider && !e.is_unbound())
            .ok_or_else(|| ValidationError::BusinessRuleViolation {
                rule: "external login not found or already unbound".to_string(),
            })?;

        if !has_password_login && other_active_logins == 0 {
            return Err(ValidationError::BusinessRuleViolation {
                rule: "cannot unbind the only login method".to_string(),
            }
            .into());
        }

        binding.unbind();
        self.touch();
        Ok(())
    }

    /// Whether the account has at least one usable login method
    pub fn has_any_login_method(&self) -> bool {
        let has_password_login = !self.password_hash.trim().is_empty();
        let has_active_external = self.external_logins.iter().any(|e| !e.is_unbound());
        has_password_login || has_active_external
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> UserAccount {
        UserAccount::register("13800138000", "hashed-password", None).unwrap()
    }

    #[test]
    fn test_register_defaults() {
        let account = account();
        assert_eq!(account.id(), 0);
        assert_eq!(account.phone_number(), "13800138000");
        assert_eq!(account.status(), UserStatus::Active);
        assert_eq!(account.access_failed_count(), 0);
        assert!(!account.force_otp_on_login());
        assert!(!account.is_locked_out());
        assert!(account.tokens().is_empty());
    }

    #[test]
    fn test_register_rejects_empty_fields() {
        assert!(UserAccount::register("", "hash", None).is_err());
        assert!(UserAccount::register("13800138000", "  ", None).is_err());
    }

    #[test]
    fn test_lock_and_unlock() {
        let mut account = account();

        account.lock(Duration::hours(1)).unwrap();
        assert!(account.is_locked_out());

        account.unlock();
        assert!(!account.is_locked_out());
        assert!(!account.lockout_enabled());
        assert!(account.lockout_end().is_none());
        assert_eq!(account.access_failed_count(), 0);
    }

    #[test]
    fn test_lock_rejects_non_positive_duration() {
        let mut account = account();

        let err = account.lock(Duration::hours(-1));
        assert!(err.is_err());
        assert!(!account.lockout_enabled());
        assert!(account.lockout_end().is_none());

        assert!(account.lock(Duration::zero()).is_err());
        assert!(!account.is_locked_out());
    }

    #[test]
    fn test_lockout_expires_with_time() {
        let mut account = account();
        account.lock(Duration::milliseconds(1)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(!account.is_locked_out());
    }

    #[test]
    fn test_failed_attempts_trigger_risk_flag_at_threshold() {
        let mut account = account();

        for i in 1..MAX_LOGIN_ATTEMPTS {
            account.record_failed_attempt();
            assert_eq!(account.access_failed_count(), i);
            assert!(!account.force_otp_on_login());
        }

        account.record_failed_attempt();
        assert_eq!(account.access_failed_count(), MAX_LOGIN_ATTEMPTS);
        assert!(account.force_otp_on_login());
    }

    #[test]
    fn test_successful_login_clears_counter_and_risk_flag() {
        let mut account = account();
        for _ in 0..MAX_LOGIN_ATTEMPTS {
            account.record_failed_attempt();
        }
        assert!(account.force_otp_on_login());

        account.record_successful_login();
        assert_eq!(account.access_failed_count(), 0);
        assert!(!account.force_otp_on_login());
    }

    #[test]
    fn test_unlock_alone_keeps_risk_flag() {
        let mut account = account();
        for _ in 0..MAX_LOGIN_ATTEMPTS {
            account.record_failed_attempt();
        }
        account.lock(Duration::hours(1)).unwrap();

        account.unlock();
        assert_eq!(account.access_failed_count(), 0);
        assert!(account.force_otp_on_login());
    }

    #[test]
    fn test_add_or_update_token_replaces_active_token_in_place() {
        let mut account = account();
        let expiry = Utc::now() + Duration::days(1);

        account
            .add_or_update_token(
                UserToken::new(UserTokenType::RefreshToken, "first", Some(expiry)).unwrap(),
            )
            .unwrap();
        account
            .add_or_update_token(
                UserToken::new(UserTokenType::RefreshToken, "second", Some(expiry)).unwrap(),
            )
            .unwrap();

        assert_eq!(account.tokens().len(), 1);
        let token = account.token_of_type(UserTokenType::RefreshToken).unwrap();
        assert_eq!(token.value(), "second");
    }

    #[test]
    fn test_add_or_update_token_appends_after_expiry() {
        let mut account = account();
        let past = Utc::now() - Duration::hours(1);

        account
            .add_or_update_token(
                UserToken::new(UserTokenType::RefreshToken, "expired", Some(past)).unwrap(),
            )
            .unwrap();
        account
            .add_or_update_token(
                UserToken::new(
                    UserTokenType::RefreshToken,
                    "fresh",
                    Some(Utc::now() + Duration::days(1)),
                )
                .unwrap(),
            )
            .unwrap();

        assert_eq!(account.tokens().len(), 2);
    }

    #[test]
    fn test_replacing_token_without_expiry_defaults_expiry() {
        let mut account = account();
        account
            .add_or_update_token(
                UserToken::new(
                    UserTokenType::PhoneVerification,
                    "first",
                    Some(Utc::now() + Duration::hours(1)),
                )
                .unwrap(),
            )
            .unwrap();
        account
            .add_or_update_token(
                UserToken::new(UserTokenType::PhoneVerification, "second", None).unwrap(),
            )
            .unwrap();

        let token = account
            .token_of_type(UserTokenType::PhoneVerification)
            .unwrap();
        assert_eq!(token.value(), "second");
        assert!(token.expires_at().unwrap() > Utc::now() + Duration::hours(23));
    }

    #[test]
    fn test_tokens_of_different_types_coexist() {
        let mut account = account();
        account
            .add_or_update_token(
                UserToken::new(UserTokenType::RefreshToken, "refresh", None).unwrap(),
            )
            .unwrap();
        account
            .add_or_update_token(
                UserToken::new(UserTokenType::ResetPassword, "reset", None).unwrap(),
            )
            .unwrap();

        assert_eq!(account.tokens().len(), 2);
        assert!(account.token_of_type(UserTokenType::RefreshToken).is_some());
        assert!(account.token_of_type(UserTokenType::ResetPassword).is_some());
    }

    #[test]
    fn test_change_password() {
        let mut account = account();
        account
            .change_password("new-hash", Some("new-salt".to_string()))
            .unwrap();
        assert_eq!(account.password_hash(), "new-hash");
        assert_eq!(account.salt(), Some("new-salt"));

        assert!(account.change_password("", None).is_err());
    }

    #[test]
    fn test_unbind_external_login() {
        use crate::domain::entities::external_login::{ExternalLogin, LoginProviderType};

        let mut account = account();
        account
            .add_or_update_external_login(
                ExternalLogin::new(LoginProviderType::WeChatMiniProgram, "open-id").unwrap(),
            )
            .unwrap();

        // Password login exists, unbinding is allowed
        assert!(account
            .remove_external_login(LoginProviderType::WeChatMiniProgram)
            .is_ok());
        assert!(account
            .external_login(LoginProviderType::WeChatMiniProgram)
            .is_none());

        // Unbinding again fails: no active binding remains
        assert!(account
            .remove_external_login(LoginProviderType::WeChatMiniProgram)
            .is_err());
    }

    #[test]
    fn test_rebinding_external_login() {
        use crate::domain::entities::external_login::{ExternalLogin, LoginProviderType};

        let mut account = account();
        account
            .add_or_update_external_login(
                ExternalLogin::new(LoginProviderType::WeChatMiniProgram, "open-id").unwrap(),
            )
            .unwrap();
        account
            .remove_external_login(LoginProviderType::WeChatMiniProgram)
            .unwrap();

        account
            .add_or_update_external_login(
                ExternalLogin::new(LoginProviderType::WeChatMiniProgram, "open-id").unwrap(),
            )
            .unwrap();
        assert_eq!(account.external_logins().len(), 1);
        assert!(account
            .external_login(LoginProviderType::WeChatMiniProgram)
            .is_some());
    }

    #[test]
    fn test_has_any_login_method() {
        let account = account();
        assert!(account.has_any_login_method());
    }
}
