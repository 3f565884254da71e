//! Password hashing and verification backed by bcrypt.

use crate::errors::{DomainError, DomainResult, ValidationError};

/// Hashes and verifies passwords with bcrypt
///
/// bcrypt embeds its own salt and cost factor in the produced hash, so
/// hashing the same secret twice yields different strings while
/// verification still succeeds. The optional external salt slot exists for
/// contract compatibility with stores that carry one; bcrypt does not need
/// it and this hasher returns `None`.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a secret, returning the hash and the (unused) external salt
    ///
    /// # Errors
    ///
    /// Returns a validation error when `secret` is empty.
    pub fn hash(&self, secret: &str) -> DomainResult<(String, Option<String>)> {
        if secret.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "secret".to_string(),
            }
            .into());
        }

        let hash = bcrypt::hash(secret, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash secret: {}", e),
        })?;

        Ok((hash, None))
    }

    /// Verify a secret against a stored hash
    ///
    /// A mismatched secret returns `Ok(false)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `secret` or `hash` is empty, and an
    /// internal error when the stored hash is not a valid bcrypt string.
    pub fn verify(&self, secret: &str, hash: &str, _salt: Option<&str>) -> DomainResult<bool> {
        if secret.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "secret".to_string(),
            }
            .into());
        }
        if hash.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "hash".to_string(),
            }
            .into());
        }

        bcrypt::verify(secret, hash).map_err(|e| DomainError::Internal {
            message: format!("Failed to verify secret: {}", e),
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // MIN_COST keeps the tests fast; production uses DEFAULT_COST
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hasher = hasher();
        let (hash, salt) = hasher.hash("abc123").unwrap();

        assert!(hasher.verify("abc123", &hash, salt.as_deref()).unwrap());
        assert!(!hasher.verify("wrong", &hash, salt.as_deref()).unwrap());
    }

    #[test]
    fn test_hash_is_salted_per_call() {
        let hasher = hasher();
        let (first, _) = hasher.hash("abc123").unwrap();
        let (second, _) = hasher.hash("abc123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("abc123", &first, None).unwrap());
        assert!(hasher.verify("abc123", &second, None).unwrap());
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let hasher = hasher();
        assert!(hasher.hash("").is_err());
        assert!(hasher.verify("", "some-hash", None).is_err());
        assert!(hasher.verify("secret", "", None).is_err());
    }
}
