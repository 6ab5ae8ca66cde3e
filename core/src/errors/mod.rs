//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;
use vt_shared::{error_codes, ErrorResponse, IntoErrorResponse};

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    /// Credential store read or write failure
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                error_codes::VALIDATION_ERROR
            }
            DomainError::NotFound { .. } | DomainError::Auth(AuthError::UserNotFound) => {
                error_codes::NOT_FOUND
            }
            DomainError::Auth(AuthError::UserAlreadyExists) => error_codes::USER_ALREADY_EXISTS,
            DomainError::Auth(AuthError::InvalidCredentials) => error_codes::INVALID_CREDENTIALS,
            DomainError::Unauthorized | DomainError::Token(TokenError::Missing) => {
                error_codes::UNAUTHORIZED
            }
            DomainError::Token(TokenError::InvalidCredential) => error_codes::TOKEN_INVALID,
            DomainError::Token(TokenError::Expired) => error_codes::TOKEN_EXPIRED,
            DomainError::Token(TokenError::StaleCredential) => error_codes::TOKEN_STALE,
            DomainError::Token(TokenError::GenerationFailed) | DomainError::Internal { .. } => {
                error_codes::INTERNAL_ERROR
            }
            DomainError::Persistence { .. } => error_codes::DATABASE_ERROR,
        }
    }

    /// Whether the underlying cause is a server-side failure
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            DomainError::Persistence { .. }
                | DomainError::Internal { .. }
                | DomainError::Token(TokenError::GenerationFailed)
        )
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        // Store and internal details stay in the logs
        let message = match self {
            DomainError::Persistence { .. } => "A database error occurred".to_string(),
            DomainError::Internal { .. } => "An internal error occurred".to_string(),
            other => other.to_string(),
        };
        ErrorResponse::new(self.error_code(), message)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
