use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::RegisterRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use vt_core::repositories::UserRepository;
use vt_core::services::auth::PasswordHasher;
use vt_shared::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/users/register
///
/// Creates an account. The avatar is the URL of an image the client already
/// uploaded to the media host.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "jane.doe",
///     "email": "jane@example.com",
///     "full_name": "Jane Doe",
///     "password": "correct horse",
///     "avatar": "https://media.example.com/jane.png"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// The public projection of the new user inside the `ApiResponse` envelope.
///
/// ## Errors
/// - 400 Bad Request: Missing or malformed fields
/// - 409 Conflict: Username or email already taken
pub async fn register<U, H>(
    state: web::Data<AppState<U, H>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.auth_service.register(request.into_inner().into()).await {
        Ok(user) => HttpResponse::Created()
            .json(ApiResponse::success(user).with_message("User registered successfully")),
        Err(error) => handle_domain_error(error),
    }
}
