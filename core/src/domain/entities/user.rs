//! User entity representing a registered account in the Vidtube system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity as persisted in the credential store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique handle, stored trimmed and lowercase
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Display name
    pub full_name: String,

    /// bcrypt digest of the password, never the plaintext
    pub password_hash: String,

    /// Avatar URL on the media host
    pub avatar: String,

    /// Optional cover image URL on the media host
    pub cover_image: Option<String>,

    /// The single current refresh token, if a session is active
    pub refresh_token: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance with no active session
    pub fn new(
        username: String,
        email: String,
        full_name: String,
        password_hash: String,
        avatar: String,
        cover_image: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            full_name,
            password_hash,
            avatar,
            cover_image,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored refresh token (`None` clears it)
    pub fn set_refresh_token(&mut self, token: Option<String>) {
        self.refresh_token = token;
        self.updated_at = Utc::now();
    }

    /// Checks if a refresh token is currently stored
    pub fn has_session(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Projection safe to hand to clients
    pub fn to_public(&self) -> PublicUser {
        PublicUser::from(self)
    }
}

/// User without credential material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            cover_image: user.cover_image.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser::from(&user)
    }
}

/// Registration input before validation and hashing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub avatar: String,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// Lookup that matches a user by username OR email
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserFilter {
    pub fn username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: None,
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            username: None,
            email: Some(email.into()),
        }
    }

    pub fn username_or_email(username: Option<String>, email: Option<String>) -> Self {
        Self { username, email }
    }

    /// A filter with no criteria matches nothing
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }

    pub fn matches(&self, user: &User) -> bool {
        let by_username = self
            .username
            .as_deref()
            .is_some_and(|username| user.username == username);
        let by_email = self
            .email
            .as_deref()
            .is_some_and(|email| user.email == email);
        by_username || by_email
    }
}
