use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::RefreshTokenRequest;
use crate::handlers::error::handle_domain_error;

use vt_core::repositories::UserRepository;
use vt_core::services::auth::PasswordHasher;
use vt_shared::ApiResponse;

use super::AppState;

/// Handler for POST /api/v1/users/refresh-token
///
/// Exchanges a refresh token for a new pair. The token is read from the
/// refresh cookie, or from the `refresh_token` body field when no cookie is
/// sent. The presented token stops working once this call succeeds.
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, expired or already used token
pub async fn refresh<U, H>(
    req: HttpRequest,
    state: web::Data<AppState<U, H>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let token = req
        .cookie(&state.cookies.refresh_cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.trim().is_empty())
        .or_else(|| body.and_then(|b| b.into_inner().refresh_token));

    match state.auth_service.refresh(token.as_deref()).await {
        Ok(auth) => {
            let mut builder = HttpResponse::Ok();
            state.set_session_cookies(&mut builder, &auth);
            builder.json(ApiResponse::success(auth).with_message("Access token refreshed"))
        }
        Err(error) => handle_domain_error(error),
    }
}
