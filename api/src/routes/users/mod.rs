//! Account and session route handlers
//!
//! This module contains the user endpoints:
//! - Registration
//! - Login (username or email)
//! - Token refresh
//! - Logout
//! - Current user lookup

pub mod current_user;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpResponseBuilder;
use std::sync::Arc;

use vt_core::domain::value_objects::AuthResponse;
use vt_core::repositories::UserRepository;
use vt_core::services::auth::{AuthService, PasswordHasher};
use vt_shared::CookieConfig;

/// Application state that holds shared services
pub struct AppState<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, H>>,
    pub cookies: CookieConfig,
}

impl<U, H> AppState<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub fn new(auth_service: Arc<AuthService<U, H>>, cookies: CookieConfig) -> Self {
        Self {
            auth_service,
            cookies,
        }
    }

    /// Attach both session cookies for a freshly issued pair
    pub(crate) fn set_session_cookies(
        &self,
        builder: &mut HttpResponseBuilder,
        auth: &AuthResponse,
    ) {
        builder
            .cookie(self.cookie(
                &self.cookies.access_cookie_name,
                auth.access_token.clone(),
                auth.expires_in,
            ))
            .cookie(self.cookie(
                &self.cookies.refresh_cookie_name,
                auth.refresh_token.clone(),
                auth.refresh_expires_in,
            ));
    }

    /// Expire both session cookies on the client
    pub(crate) fn clear_session_cookies(&self, builder: &mut HttpResponseBuilder) {
        for name in [
            &self.cookies.access_cookie_name,
            &self.cookies.refresh_cookie_name,
        ] {
            let mut cookie = self.cookie(name, String::new(), 0);
            cookie.make_removal();
            builder.cookie(cookie);
        }
    }

    fn cookie(&self, name: &str, value: String, max_age_seconds: i64) -> Cookie<'static> {
        Cookie::build(name.to_string(), value)
            .http_only(self.cookies.http_only)
            .secure(self.cookies.secure)
            .path(self.cookies.path.clone())
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(max_age_seconds))
            .finish()
    }
}
