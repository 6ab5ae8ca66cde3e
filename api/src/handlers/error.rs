use actix_web::{http::StatusCode, HttpResponse};
use vt_core::errors::{AuthError, DomainError, TokenError};
use vt_shared::{error_codes, IntoErrorResponse};

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::Auth(AuthError::UserAlreadyExists) => StatusCode::CONFLICT,
        DomainError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(AuthError::UserNotFound) | DomainError::NotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Token(TokenError::GenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Persistence { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    if error.is_server_error() {
        log::error!("Domain Error: {:?}", error);
    } else {
        log::debug!("Request rejected: {}", error);
    }

    error.to_error_response().to_response(status_for(&error))
}

/// Field errors from request DTO validation
pub fn handle_validation_errors(errors: validator::ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body");
    for (field, field_errors) in errors.field_errors() {
        let codes: Vec<String> = field_errors.iter().map(|e| e.code.to_string()).collect();
        response = response.add_detail(field.to_string(), codes);
    }

    response.to_response(StatusCode::BAD_REQUEST)
}
