//! Main token service implementation

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use uuid::Uuid;

use crate::domain::entities::token::{AccessClaims, RefreshClaims, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::UserRepository;

use super::config::TokenServiceConfig;
use super::signer::JwtSigner;

/// Issues, verifies and rotates the access/refresh tokens of a user
///
/// Access tokens are self-contained and never checked against the store.
/// Refresh tokens are valid only while they equal the single value stored
/// on the user record.
pub struct TokenService<R: UserRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
    access_signer: JwtSigner,
    refresh_signer: JwtSigner,
}

impl<R: UserRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - User repository holding the refresh token slot
    /// * `config` - Secrets, lifetimes and issuer
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        let access_signer = JwtSigner::new(&config.access_token_secret, &config.issuer);
        let refresh_signer = JwtSigner::new(&config.refresh_token_secret, &config.issuer);

        Self {
            repository,
            config,
            access_signer,
            refresh_signer,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a new pair for a user and stores the refresh token
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The pair now valid for the user
    /// * `Err(DomainError::NotFound)` - No such user
    /// * `Err(DomainError::Persistence)` - Load or save failed; stored value unchanged
    pub async fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, DomainError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "User".to_string(),
            })?;

        self.mint_and_store(&user).await
    }

    /// Verifies an access token and returns its claims
    ///
    /// Pure function of the token and the access secret.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, DomainError> {
        Ok(self.access_signer.verify::<AccessClaims>(token)?)
    }

    /// Exchanges a refresh token for a new pair
    ///
    /// The presented token must be correctly signed, unexpired and textually
    /// equal to the stored value. Nothing is written unless a new pair is
    /// issued.
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::Missing)` - No token presented
    /// * `Err(TokenError::InvalidCredential)` - Bad signature or unknown user
    /// * `Err(TokenError::Expired)` - Past its expiry
    /// * `Err(TokenError::StaleCredential)` - Already rotated or revoked
    pub async fn verify_and_rotate_refresh(
        &self,
        token: Option<&str>,
    ) -> Result<TokenPair, DomainError> {
        self.rotate_refresh(token).await.map(|(_, pair)| pair)
    }

    /// Same as [`Self::verify_and_rotate_refresh`], also returning the user
    /// the pair was issued to
    pub async fn rotate_refresh(
        &self,
        token: Option<&str>,
    ) -> Result<(User, TokenPair), DomainError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TokenError::Missing)?;

        let claims = self.refresh_signer.verify::<RefreshClaims>(token)?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::from(TokenError::InvalidCredential))?;

        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(TokenError::InvalidCredential)?;

        let matches_stored = user
            .refresh_token
            .as_deref()
            .is_some_and(|stored| constant_time_eq(stored.as_bytes(), token.as_bytes()));
        if !matches_stored {
            tracing::warn!(user_id = %user.id, "Rejected stale refresh token");
            return Err(TokenError::StaleCredential.into());
        }

        let pair = self.mint_and_store(&user).await?;
        Ok((user, pair))
    }

    /// Clears the stored refresh token so no refresh succeeds until next login
    pub async fn revoke(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.repository.set_refresh_token(user_id, None).await?;
        tracing::info!(user_id = %user_id, "Revoked refresh token");
        Ok(())
    }

    /// Mints both tokens, then persists the refresh token
    async fn mint_and_store(&self, user: &User) -> Result<TokenPair, DomainError> {
        let access_claims = AccessClaims::for_user(
            user,
            self.config.access_token_expiry_seconds,
            &self.config.issuer,
        )?;
        let refresh_claims = RefreshClaims::for_user(
            user.id,
            self.config.refresh_token_expiry_seconds,
            &self.config.issuer,
        )?;

        let access_token = self.access_signer.sign(&access_claims)?;
        let refresh_token = self.refresh_signer.sign(&refresh_claims)?;

        self.repository
            .set_refresh_token(user.id, Some(&refresh_token))
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Failed to store refresh token");
                e
            })?;

        tracing::debug!(user_id = %user.id, "Issued token pair");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_seconds,
            self.config.refresh_token_expiry_seconds,
        ))
    }
}
