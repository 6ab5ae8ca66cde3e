//! Password hashing primitive

use crate::errors::DomainError;

/// One-way hashing of account passwords
pub trait PasswordHasher: Send + Sync {
    /// Produces a salted digest of `plain`
    fn hash(&self, plain: &str) -> Result<String, DomainError>;

    /// Checks `plain` against a digest produced by [`PasswordHasher::hash`]
    fn verify(&self, plain: &str, digest: &str) -> Result<bool, DomainError>;
}

/// bcrypt-backed hasher
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        bcrypt::hash(plain, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    fn verify(&self, plain: &str, digest: &str) -> Result<bool, DomainError> {
        match bcrypt::verify(plain, digest) {
            Ok(valid) => Ok(valid),
            Err(e) => {
                // A malformed digest can never match
                tracing::warn!(error = %e, "Stored password digest is not valid bcrypt");
                Ok(false)
            }
        }
    }
}
