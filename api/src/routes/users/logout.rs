use actix_web::{web, HttpResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use vt_core::repositories::UserRepository;
use vt_core::services::auth::PasswordHasher;
use vt_shared::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/users/logout
///
/// Clears the stored refresh token and expires both session cookies.
/// Requires authentication. Access tokens already issued stay valid until
/// they expire.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 500 Internal Server Error: Store write failure
pub async fn logout<U, H>(
    state: web::Data<AppState<U, H>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    match state.auth_service.logout(auth.user_id()).await {
        Ok(()) => {
            let mut builder = HttpResponse::Ok();
            state.clear_session_cookies(&mut builder);
            builder.json(
                ApiResponse::success(LogoutResponse { logged_out: true })
                    .with_message("User logged out"),
            )
        }
        Err(error) => handle_domain_error(error),
    }
}
