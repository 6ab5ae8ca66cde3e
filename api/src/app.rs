//! Application factory
//!
//! Builds the Actix-web application around an already constructed
//! [`AppState`], so the binary and the integration tests share one routing
//! table.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::middleware::{auth::JwtAuth, cors::create_cors, SessionResolver};
use crate::routes::health::health_check;
use crate::routes::users::{
    current_user::current_user, login::login, logout::logout, refresh::refresh,
    register::register, AppState,
};

use vt_core::repositories::UserRepository;
use vt_core::services::auth::PasswordHasher;
use vt_shared::{error_codes, AppConfig};

/// Create and configure the application with all dependencies
pub fn create_app<U, H>(
    app_state: web::Data<AppState<U, H>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let resolver: Arc<dyn SessionResolver> = app_state.auth_service.clone();
    let access_cookie = app_state.cookies.access_cookie_name.clone();
    let session = move || JwtAuth::new(Arc::clone(&resolver)).with_cookie_name(access_cookie.clone());

    App::new()
        .app_data(app_state)
        .app_data(json_config(config.server.max_payload_size))
        // Logger is outermost so rejected requests are still logged
        .wrap(create_cors(&config.cors))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/users")
                    .route("/register", web::post().to(register::<U, H>))
                    .route("/login", web::post().to(login::<U, H>))
                    .route("/refresh-token", web::post().to(refresh::<U, H>))
                    .route(
                        "/logout",
                        web::post().to(logout::<U, H>).wrap(session()),
                    )
                    .route(
                        "/current-user",
                        web::get().to(current_user).wrap(session()),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// JSON extractor settings; malformed bodies become 400 validation errors
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string())
                .to_response(StatusCode::BAD_REQUEST);
            InternalError::from_response(err, response).into()
        })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}
