//! Authentication orchestration: registration, login, and refresh.

use std::sync::Arc;

use tracing::{info, warn};

use ks_shared::phone::{is_valid_phone_number, mask_phone};
use ks_shared::secret::hide_secret;
use ks_shared::OperationResult;

use crate::domain::entities::user::UserAccount;
use crate::domain::entities::user_token::{UserToken, UserTokenType};
use crate::domain::value_objects::login_outcome::{AccountSummary, LoginOutcome};
use crate::domain::value_objects::requests::{LoginRequest, RegistrationRequest};
use crate::errors::{into_operation_result, AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::AccountRepository;
use crate::services::credential::PasswordHasher;
use crate::services::token::JwtProvider;

use super::config::AuthServiceConfig;
use super::otp::{NoopOtpVerifier, OtpVerifier};

/// Authentication service coordinating accounts, credentials, and tokens
///
/// Every operation follows the same shape: load the account, run the
/// aggregate's state transitions in memory, stage the result, and commit
/// once at the end. An operation dropped before its commit leaves the
/// store untouched.
pub struct AuthService<R: AccountRepository, O: OtpVerifier = NoopOtpVerifier> {
    account_repository: Arc<R>,
    jwt_provider: Arc<JwtProvider>,
    password_hasher: PasswordHasher,
    otp_verifier: Arc<O>,
    config: AuthServiceConfig,
}

impl<R: AccountRepository> AuthService<R> {
    /// Create a service with the default no-op OTP verifier
    pub fn new(
        account_repository: Arc<R>,
        jwt_provider: Arc<JwtProvider>,
        password_hasher: PasswordHasher,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            account_repository,
            jwt_provider,
            password_hasher,
            otp_verifier: Arc::new(NoopOtpVerifier),
            config,
        }
    }
}

impl<R: AccountRepository, O: OtpVerifier> AuthService<R, O> {
    /// Create a service with a custom OTP verifier
    pub fn with_otp_verifier(
        account_repository: Arc<R>,
        jwt_provider: Arc<JwtProvider>,
        password_hasher: PasswordHasher,
        otp_verifier: Arc<O>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            account_repository,
            jwt_provider,
            password_hasher,
            otp_verifier,
            config,
        }
    }

    /// Register a new account with phone number and password
    pub async fn register(&self, request: RegistrationRequest) -> OperationResult<AccountSummary> {
        into_operation_result(self.register_inner(request).await)
    }

    /// Authenticate with phone number, password, and optional OTP code
    pub async fn login(&self, request: LoginRequest) -> OperationResult<LoginOutcome> {
        into_operation_result(self.login_inner(request).await)
    }

    /// Exchange a refresh token for a fresh token pair, rotating it
    pub async fn refresh_token(&self, refresh_token: &str) -> OperationResult<LoginOutcome> {
        into_operation_result(self.refresh_token_inner(refresh_token).await)
    }

    async fn register_inner(
        &self,
        request: RegistrationRequest,
    ) -> DomainResult<AccountSummary> {
        if !self.config.allow_registration {
            warn!("Registration attempt while registration is disabled");
            return Err(AuthError::RegistrationDisabled.into());
        }

        if !is_valid_phone_number(&request.phone_number) {
            return Err(AuthError::InvalidInput {
                message: "Invalid phone number format".to_string(),
            }
            .into());
        }

        if request.password.is_empty() {
            return Err(AuthError::InvalidInput {
                message: "Password is required".to_string(),
            }
            .into());
        }

        if self
            .account_repository
            .find_by_phone(&request.phone_number, false)
            .await?
            .is_some()
        {
            warn!(
                phone = %mask_phone(&request.phone_number),
                "Registration rejected, phone number already registered"
            );
            return Err(AuthError::DuplicateAccount.into());
        }

        let (password_hash, salt) = self.password_hasher.hash(&request.password)?;
        let mut account = UserAccount::register(request.phone_number, password_hash, salt)?;
        if request.first_name.is_some()
            || request.last_name.is_some()
            || request.display_name.is_some()
        {
            account.update_profile(request.first_name, request.last_name, request.display_name);
        }

        let account = self.account_repository.insert(account).await?;
        self.commit().await?;

        info!(
            account_id = account.id(),
            phone = %mask_phone(account.phone_number()),
            "Account registered"
        );
        Ok(AccountSummary::from(&account))
    }

    async fn login_inner(&self, request: LoginRequest) -> DomainResult<LoginOutcome> {
        if request.phone_number.is_empty() || request.password.is_empty() {
            return Err(AuthError::InvalidInput {
                message: "Phone number and password are required".to_string(),
            }
            .into());
        }

        let mut account = self
            .account_repository
            .find_by_phone(&request.phone_number, true)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if account.is_locked_out() {
            warn!(
                account_id = account.id(),
                phone = %mask_phone(account.phone_number()),
                "Login attempt against locked account"
            );
            return Err(AuthError::AccountLocked.into());
        }

        // Risk-flagged accounts must present an OTP code; without one the
        // caller gets a challenge and no state changes.
        if account.force_otp_on_login() && request.otp_code.is_none() {
            info!(
                account_id = account.id(),
                phone = %mask_phone(account.phone_number()),
                "OTP challenge issued"
            );
            return Ok(LoginOutcome::otp_required());
        }

        let password_ok = self.password_hasher.verify(
            &request.password,
            account.password_hash(),
            account.salt(),
        )?;
        if !password_ok {
            account.record_failed_attempt();
            let failed_count = account.access_failed_count();
            self.account_repository.update(account.clone()).await?;
            self.commit().await?;

            warn!(
                account_id = account.id(),
                phone = %mask_phone(account.phone_number()),
                failed_count,
                "Login failed, wrong password"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        // The code is checked only when the account demanded one; a code
        // supplied unprompted is ignored. A wrong OTP never counts toward
        // lockout, the password was right.
        if account.force_otp_on_login() {
            if let Some(ref code) = request.otp_code {
                if !self
                    .otp_verifier
                    .verify(account.phone_number(), code)
                    .await?
                {
                    warn!(
                        account_id = account.id(),
                        phone = %mask_phone(account.phone_number()),
                        "Login failed, wrong OTP code"
                    );
                    return Err(AuthError::InvalidCredentials.into());
                }
            }
        }

        account.record_successful_login();
        let outcome = self.issue_and_attach_tokens(account).await?;
        Ok(outcome)
    }

    async fn refresh_token_inner(&self, refresh_token: &str) -> DomainResult<LoginOutcome> {
        if refresh_token.is_empty() {
            return Err(AuthError::InvalidInput {
                message: "Refresh token is required".to_string(),
            }
            .into());
        }

        let account = self
            .account_repository
            .find_by_token(UserTokenType::RefreshToken, refresh_token)
            .await?
            .ok_or(TokenError::InvalidToken)?;

        let stored = account
            .tokens()
            .iter()
            .find(|t| {
                t.token_type() == UserTokenType::RefreshToken && t.value() == refresh_token
            })
            .ok_or(TokenError::InvalidToken)?;
        if stored.has_expired() {
            warn!(
                account_id = account.id(),
                phone = %mask_phone(account.phone_number()),
                "Refresh rejected, token expired"
            );
            return Err(TokenError::InvalidToken.into());
        }

        if account.is_locked_out() {
            warn!(
                account_id = account.id(),
                phone = %mask_phone(account.phone_number()),
                "Refresh rejected, account locked"
            );
            return Err(AuthError::AccountLocked.into());
        }

        let outcome = self.issue_and_attach_tokens(account).await?;
        Ok(outcome)
    }

    /// Issue a token pair, attach the refresh token to the account, and
    /// commit the mutated aggregate
    async fn issue_and_attach_tokens(
        &self,
        mut account: UserAccount,
    ) -> DomainResult<LoginOutcome> {
        let pair = self
            .jwt_provider
            .issue_token_pair(&account, &serde_json::Map::new())?;

        account.add_or_update_token(UserToken::new(
            UserTokenType::RefreshToken,
            pair.refresh_token.clone(),
            Some(pair.refresh_expires_at),
        )?)?;

        let summary = AccountSummary::from(&account);
        self.account_repository.update(account.clone()).await?;
        self.commit().await?;

        info!(
            account_id = account.id(),
            phone = %mask_phone(account.phone_number()),
            refresh_token = %hide_secret(&pair.refresh_token, 4),
            "Token pair issued"
        );
        Ok(LoginOutcome::authenticated(summary, pair))
    }

    /// Commit staged changes, treating a negative affected count as a
    /// persistence failure
    async fn commit(&self) -> DomainResult<()> {
        let affected = self.account_repository.save_changes().await?;
        if affected < 0 {
            return Err(DomainError::Persistence {
                message: format!("save_changes reported failure ({})", affected),
            });
        }
        Ok(())
    }
}
