//! Authentication service module
//!
//! This module provides the account use cases:
//! - Registration with input validation and password hashing
//! - Login by username or email
//! - Logout (refresh token revocation)
//! - Token refresh and current user lookup

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use service::AuthService;
