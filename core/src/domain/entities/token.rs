//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;
use crate::errors::TokenError;

/// Issue time and expiry for a token living `lifetime_seconds`
///
/// Fails when the expiry falls outside the representable date range.
fn issued_window(lifetime_seconds: i64) -> Result<(DateTime<Utc>, DateTime<Utc>), TokenError> {
    let now = Utc::now();
    let expiry = Duration::try_seconds(lifetime_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(TokenError::GenerationFailed)?;
    Ok((now, expiry))
}

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,

    pub email: String,

    pub username: String,

    pub full_name: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl AccessClaims {
    /// Creates access claims for a user
    ///
    /// # Arguments
    ///
    /// * `user` - The identity the token asserts
    /// * `lifetime_seconds` - Seconds until expiry
    /// * `issuer` - Value of the `iss` claim
    ///
    /// # Errors
    ///
    /// `TokenError::GenerationFailed` when the lifetime overflows the date range
    pub fn for_user(user: &User, lifetime_seconds: i64, issuer: &str) -> Result<Self, TokenError> {
        let (now, expiry) = issued_window(lifetime_seconds)?;

        Ok(Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Claims carried by a refresh token; identity only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub jti: String,
}

impl RefreshClaims {
    pub fn for_user(user_id: Uuid, lifetime_seconds: i64, issuer: &str) -> Result<Self, TokenError> {
        let (now, expiry) = issued_window(lifetime_seconds)?;

        Ok(Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// A freshly minted access/refresh pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
