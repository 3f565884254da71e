//! One-time-password verification collaborator.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Verifies an OTP code for a phone number
///
/// Implementations talk to an SMS or TOTP backend. The service only cares
/// about the boolean verdict; delivery and code storage live behind the
/// implementation.
#[async_trait]
pub trait OtpVerifier: Send + Sync {
    /// Check whether `code` is currently valid for `phone_number`
    async fn verify(&self, phone_number: &str, code: &str) -> DomainResult<bool>;
}

/// Verifier that accepts every code
///
/// Placeholder until an SMS backend is wired in. Deployments requiring a
/// real second factor must supply their own implementation.
#[derive(Debug, Clone, Default)]
pub struct NoopOtpVerifier;

#[async_trait]
impl OtpVerifier for NoopOtpVerifier {
    async fn verify(&self, _phone_number: &str, _code: &str) -> DomainResult<bool> {
        Ok(true)
    }
}
