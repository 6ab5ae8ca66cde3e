use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::LoginRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use vt_core::repositories::UserRepository;
use vt_core::services::auth::PasswordHasher;
use vt_shared::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/users/login
///
/// Accepts a username or an email together with the password. On success
/// the token pair is returned in the body and set as http-only cookies.
///
/// ## Errors
/// - 400 Bad Request: Password or both identifiers missing
/// - 401 Unauthorized: Wrong password
/// - 404 Not Found: No such user
pub async fn login<U, H>(
    state: web::Data<AppState<U, H>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.auth_service.login(request.into_inner().into()).await {
        Ok(auth) => {
            let mut builder = HttpResponse::Ok();
            state.set_session_cookies(&mut builder, &auth);
            builder.json(ApiResponse::success(auth).with_message("User logged in successfully"))
        }
        Err(error) => handle_domain_error(error),
    }
}
