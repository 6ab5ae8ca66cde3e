use actix_web::HttpResponse;

use crate::middleware::auth::AuthContext;
use vt_shared::ApiResponse;

/// Handler for GET /api/v1/users/current-user
///
/// Returns the user the session middleware resolved.
pub async fn current_user(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok()
        .json(ApiResponse::success(auth.user).with_message("Current user fetched successfully"))
}
