//! User repository trait defining the interface for credential store access.
//!
//! The trait is async-first and keeps the domain independent of the concrete
//! store. Every method reports store failures as `DomainError::Persistence`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserFilter};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find the first user whose username OR email matches the filter
    ///
    /// An empty filter matches nothing.
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Username or email taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace an existing user record
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Overwrite only the stored refresh token; `None` clears it
    ///
    /// # Arguments
    /// * `id` - The user to modify
    /// * `token` - The new refresh token value
    ///
    /// # Returns
    /// * `Ok(())` - Value written
    /// * `Err(DomainError::NotFound)` - No such user
    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), DomainError>;

    /// Delete a user from the repository
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
