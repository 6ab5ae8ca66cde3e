//! Authentication request and response value objects.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::PublicUser;

/// Authentication response containing the public user and a fresh token pair
///
/// Returned after a successful login or refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// The authenticated user
    pub user: PublicUser,

    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining a new pair
    pub refresh_token: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// Refresh token expiration time in seconds
    pub refresh_expires_in: i64,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and user
    ///
    /// # Arguments
    ///
    /// * `user` - Public projection of the authenticated user
    /// * `tokens` - The pair just issued for that user
    pub fn from_token_pair(user: PublicUser, tokens: TokenPair) -> Self {
        Self {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.access_expires_in,
            refresh_expires_in: tokens.refresh_expires_in,
        }
    }
}

/// Login credentials: password plus username and/or email
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}
