//! Shared fixtures for api integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{cookie::Cookie, dev::ServiceResponse, web};

use vt_api::AppState;
use vt_core::domain::entities::{NewUser, PublicUser};
use vt_core::repositories::MockUserRepository;
use vt_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, TokenService, TokenServiceConfig,
};
use vt_shared::AppConfig;

pub const ACCESS_SECRET: &str = "api-test-access-secret";
pub const REFRESH_SECRET: &str = "api-test-refresh-secret";
pub const PASSWORD: &str = "password123";

pub type TestState = AppState<MockUserRepository, BcryptPasswordHasher>;

pub struct TestContext {
    pub repo: MockUserRepository,
    pub state: web::Data<TestState>,
    pub config: AppConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let repo = MockUserRepository::new();
        let config = AppConfig::development();

        let shared = Arc::new(repo.clone());
        let token_service = Arc::new(TokenService::new(
            Arc::clone(&shared),
            TokenServiceConfig::with_secrets(ACCESS_SECRET, REFRESH_SECRET),
        ));
        let auth_service = Arc::new(AuthService::new(
            shared,
            token_service,
            Arc::new(BcryptPasswordHasher::new(4)),
            AuthServiceConfig::default(),
        ));

        Self {
            repo,
            state: web::Data::new(AppState::new(auth_service, config.auth.cookies.clone())),
            config,
        }
    }

    /// Register an account directly through the service
    pub async fn register(&self, username: &str) -> PublicUser {
        self.state
            .auth_service
            .register(new_user(username))
            .await
            .expect("registration should succeed")
    }
}

pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        full_name: "Test User".to_string(),
        password: PASSWORD.to_string(),
        avatar: "https://media.example.com/avatar.png".to_string(),
        cover_image: None,
    }
}

/// Find a response cookie by name
pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}
