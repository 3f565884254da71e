//! JWT and refresh-token issuance.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use uuid::Uuid;

use ks_shared::JwtConfig;

use crate::domain::entities::user::UserAccount;
use crate::domain::value_objects::token_pair::TokenPair;
use crate::errors::{DomainResult, TokenError};

use super::claims::Claims;

/// Refresh token entropy in bytes before base64 encoding
const REFRESH_TOKEN_BYTES: usize = 32;

/// Issues signed access tokens and opaque refresh tokens
///
/// Access tokens are HS256 JWTs carrying the account id and phone number;
/// refresh tokens are random bytes with no embedded meaning, matched only
/// against the stored copy on the account.
pub struct JwtProvider {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtProvider {
    /// Create a provider from signing configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue an access/refresh token pair for an account
    ///
    /// Extra claims are flattened into the access token payload alongside
    /// the registered claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::TokenGenerationFailed`] when signing fails.
    pub fn issue_token_pair(
        &self,
        account: &UserAccount,
        extra_claims: &serde_json::Map<String, serde_json::Value>,
    ) -> DomainResult<TokenPair> {
        let now = Utc::now();
        let access_expires_at = now + Duration::minutes(self.config.access_token_expiry_minutes);
        let refresh_expires_at = now + Duration::minutes(self.config.refresh_token_expiry_minutes);

        let claims = Claims {
            sub: account.id().to_string(),
            phone_number: account.phone_number().to_string(),
            iat: now.timestamp(),
            exp: access_expires_at.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            jti: Uuid::new_v4().to_string(),
            extra: extra_claims.clone(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed)?;

        Ok(TokenPair {
            access_token,
            access_expires_at,
            refresh_token: Self::generate_refresh_token(),
            refresh_expires_at,
        })
    }

    /// Read the claims out of a token without validating it
    ///
    /// Used for diagnostics and for extracting identity hints from tokens
    /// that may already be expired. Returns an empty map when the token is
    /// not parseable at all.
    pub fn parse_claims(&self, token: &str) -> serde_json::Map<String, serde_json::Value> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        match jsonwebtoken::decode::<serde_json::Map<String, serde_json::Value>>(
            token,
            &self.decoding_key,
            &validation,
        ) {
            Ok(data) => data.claims,
            Err(_) => serde_json::Map::new(),
        }
    }

    fn generate_refresh_token() -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        BASE64.encode(bytes)
    }
}
