//! Domain-specific error types for authentication, tokens and input validation

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User with this username or email already exists")]
    UserAlreadyExists,

    #[error("Invalid user credentials")]
    InvalidCredentials,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No credential was presented at all
    #[error("Authentication token is missing")]
    Missing,

    /// Bad signature, malformed token, wrong secret or unknown subject
    #[error("Invalid token")]
    InvalidCredential,

    #[error("Token expired")]
    Expired,

    /// Well-signed refresh token that is no longer the stored one
    #[error("Refresh token has been used or revoked")]
    StaleCredential,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid length for field: {field} (min: {min}, max: {max})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
    },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Username may only contain lowercase letters, digits, '_' and '.' (3-30 characters)")]
    InvalidUsername,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages_name_the_field() {
        let error = ValidationError::RequiredField {
            field: "email".to_string(),
        };
        assert_eq!(error.to_string(), "Field required: email");

        let error = ValidationError::InvalidLength {
            field: "password".to_string(),
            min: 8,
            max: 128,
        };
        assert!(error.to_string().contains("min: 8"));
    }
}
