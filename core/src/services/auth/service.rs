//! Main authentication service implementation

use std::sync::Arc;
use uuid::Uuid;
use vt_shared::validation::{validators, ValidationErrors};

use crate::domain::entities::user::{NewUser, PublicUser, User, UserFilter};
use crate::domain::value_objects::{AuthResponse, LoginInput};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::PasswordHasher;

/// Authentication service for the account lifecycle
pub struct AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// User repository for credential store access
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService<U>>,
    /// Password hashing primitive
    password_hasher: Arc<H>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, H> AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `password_hasher` - Hashing primitive for passwords
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<U>>,
        password_hasher: Arc<H>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            password_hasher,
            config,
        }
    }

    pub fn token_service(&self) -> &TokenService<U> {
        &self.token_service
    }

    /// Register a new account
    ///
    /// The username is trimmed and lowercased before validation and storage.
    /// The password is hashed before the record is created.
    ///
    /// # Returns
    ///
    /// * `Ok(PublicUser)` - The created account
    /// * `Err(DomainError::Validation)` - Missing or malformed fields
    /// * `Err(AuthError::UserAlreadyExists)` - Username or email already taken
    pub async fn register(&self, input: NewUser) -> DomainResult<PublicUser> {
        let username = validators::normalize_username(&input.username);
        let email = validators::normalize_email(&input.email);
        let full_name = input.full_name.trim().to_string();
        let avatar = input.avatar.trim().to_string();
        let cover_image = input
            .cover_image
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("username", username.as_str()),
            ("email", email.as_str()),
            ("full_name", full_name.as_str()),
            ("password", input.password.as_str()),
            ("avatar", avatar.as_str()),
        ] {
            if !validators::not_empty(value) {
                errors.add_error(
                    field,
                    ValidationError::RequiredField {
                        field: field.to_string(),
                    }
                    .to_string(),
                );
            }
        }
        if validators::not_empty(&username) && !validators::is_valid_username(&username) {
            errors.add_error("username", ValidationError::InvalidUsername.to_string());
        }
        if validators::not_empty(&email) && !validators::is_valid_email(&email) {
            errors.add_error("email", ValidationError::InvalidEmail.to_string());
        }
        if validators::not_empty(&input.password)
            && !validators::length_between(
                &input.password,
                self.config.min_password_length,
                self.config.max_password_length,
            )
        {
            errors.add_error(
                "password",
                ValidationError::InvalidLength {
                    field: "password".to_string(),
                    min: self.config.min_password_length,
                    max: self.config.max_password_length,
                }
                .to_string(),
            );
        }
        if errors.has_errors() {
            return Err(DomainError::Validation {
                message: errors.summary(),
            });
        }

        let filter = UserFilter::username_or_email(Some(username.clone()), Some(email.clone()));
        if self.user_repository.find_one(&filter).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.password_hasher.hash(&input.password)?;
        let user = User::new(username, email, full_name, password_hash, avatar, cover_image);
        let created = self.user_repository.create(user).await?;

        tracing::info!(user_id = %created.id, "Registered new user");
        Ok(created.to_public())
    }

    /// Log in with username or email plus password
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Public user and a fresh token pair
    /// * `Err(AuthError::UserNotFound)` - No account matches
    /// * `Err(AuthError::InvalidCredentials)` - Wrong password
    pub async fn login(&self, input: LoginInput) -> DomainResult<AuthResponse> {
        let username = input
            .username
            .as_deref()
            .map(validators::normalize_username)
            .filter(|u| !u.is_empty());
        let email = input
            .email
            .as_deref()
            .map(validators::normalize_email)
            .filter(|e| !e.is_empty());

        if username.is_none() && email.is_none() {
            return Err(DomainError::Validation {
                message: "username or email is required".to_string(),
            });
        }
        if !validators::not_empty(&input.password) {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }

        let user = self
            .find_login_user(username, email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self
            .password_hasher
            .verify(&input.password, &user.password_hash)?
        {
            tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.token_service.issue_pair(user.id).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse::from_token_pair(user.to_public(), tokens))
    }

    /// End the user's session by clearing the stored refresh token
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        self.token_service.revoke(user_id).await
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh(&self, refresh_token: Option<&str>) -> DomainResult<AuthResponse> {
        let (user, tokens) = self.token_service.rotate_refresh(refresh_token).await?;
        Ok(AuthResponse::from_token_pair(user.to_public(), tokens))
    }

    /// Resolve login identifiers, username first
    ///
    /// The email is only consulted when no username was given or the
    /// username matches nobody, so a pair naming two accounts always
    /// resolves to the username's account.
    async fn find_login_user(
        &self,
        username: Option<String>,
        email: Option<String>,
    ) -> DomainResult<Option<User>> {
        if let Some(username) = username {
            let found = self
                .user_repository
                .find_one(&UserFilter::username(username))
                .await?;
            if found.is_some() {
                return Ok(found);
            }
        }

        match email {
            Some(email) => self.user_repository.find_one(&UserFilter::email(email)).await,
            None => Ok(None),
        }
    }

    /// Look up the public projection of a user
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<PublicUser> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| DomainError::NotFound {
                resource: "User".to_string(),
            })
    }
}
