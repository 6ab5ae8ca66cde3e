//! Session authentication middleware for protecting API endpoints.
//!
//! The middleware takes the access token from the access cookie or, when no
//! cookie is present, from the `Authorization: Bearer` header. It verifies the
//! token, loads the user and injects an [`AuthContext`] into the request.
//! Requests without a credential are rejected before any store access.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

use vt_core::{
    domain::entities::{AccessClaims, PublicUser},
    errors::{DomainError, TokenError},
    repositories::UserRepository,
    services::auth::{AuthService, PasswordHasher},
};

use crate::handlers::error::handle_domain_error;

/// Default name of the access token cookie
pub const ACCESS_COOKIE: &str = "accessToken";

/// Authenticated user injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Public projection of the authenticated user
    pub user: PublicUser,
    /// Verified access token claims
    pub claims: AccessClaims,
}

impl AuthContext {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}

/// Resolves an access token to a user
#[async_trait]
pub trait SessionResolver: Send + Sync {
    fn verify_access(&self, token: &str) -> Result<AccessClaims, DomainError>;

    async fn load_user(&self, user_id: Uuid) -> Result<PublicUser, DomainError>;
}

#[async_trait]
impl<U, H> SessionResolver for AuthService<U, H>
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    fn verify_access(&self, token: &str) -> Result<AccessClaims, DomainError> {
        self.token_service().verify_access(token)
    }

    async fn load_user(&self, user_id: Uuid) -> Result<PublicUser, DomainError> {
        self.current_user(user_id).await
    }
}

/// Verify a token and load the user it names
///
/// Token errors pass through; a failed user lookup is reported as an invalid
/// credential.
pub async fn authenticate(
    resolver: &dyn SessionResolver,
    token: &str,
) -> Result<AuthContext, DomainError> {
    let claims = resolver.verify_access(token)?;
    let user_id = claims
        .user_id()
        .map_err(|_| DomainError::from(TokenError::InvalidCredential))?;

    let user = resolver.load_user(user_id).await.map_err(|e| {
        if e.is_server_error() {
            log::error!("User lookup failed during authentication: {}", e);
        }
        DomainError::from(TokenError::InvalidCredential)
    })?;

    Ok(AuthContext { user, claims })
}

/// Session authentication middleware factory
pub struct JwtAuth {
    resolver: Arc<dyn SessionResolver>,
    cookie_name: String,
}

impl JwtAuth {
    /// Creates a new authentication middleware
    pub fn new(resolver: Arc<dyn SessionResolver>) -> Self {
        Self {
            resolver,
            cookie_name: ACCESS_COOKIE.to_string(),
        }
    }

    /// Read the access token from a differently named cookie
    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = cookie_name.into();
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            resolver: Arc::clone(&self.resolver),
            cookie_name: Rc::from(self.cookie_name.as_str()),
        }))
    }
}

/// Session authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    resolver: Arc<dyn SessionResolver>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let resolver = Arc::clone(&self.resolver);
        let cookie_name = Rc::clone(&self.cookie_name);

        Box::pin(async move {
            let token = match extract_token(&req, &cookie_name) {
                Some(token) => token,
                None => return Ok(reject(req, DomainError::Unauthorized)),
            };

            match authenticate(resolver.as_ref(), &token).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => Ok(reject(req, error)),
            }
        })
    }
}

fn reject<B>(req: ServiceRequest, error: DomainError) -> ServiceResponse<EitherBody<B>> {
    let response = handle_domain_error(error);
    req.into_response(response).map_into_right_body()
}

/// Access token from the cookie, falling back to the Bearer header
pub fn extract_token(req: &ServiceRequest, cookie_name: &str) -> Option<String> {
    req.cookie(cookie_name)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| extract_bearer_token(req))
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, test};

    #[::std::prelude::v1::test]
    fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();

        assert_eq!(extract_token(&req, ACCESS_COOKIE), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();

        assert_eq!(extract_token(&req_no_bearer, ACCESS_COOKIE), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_token(&req_no_header, ACCESS_COOKIE), None);
    }

    #[::std::prelude::v1::test]
    fn test_cookie_takes_precedence_over_header() {
        let req = test::TestRequest::default()
            .cookie(Cookie::new(ACCESS_COOKIE, "from_cookie"))
            .insert_header((AUTHORIZATION, "Bearer from_header"))
            .to_srv_request();

        assert_eq!(extract_token(&req, ACCESS_COOKIE), Some("from_cookie".to_string()));
    }

    #[::std::prelude::v1::test]
    fn test_empty_cookie_falls_back_to_header() {
        let req = test::TestRequest::default()
            .cookie(Cookie::new(ACCESS_COOKIE, ""))
            .insert_header((AUTHORIZATION, "Bearer from_header"))
            .to_srv_request();

        assert_eq!(extract_token(&req, ACCESS_COOKIE), Some("from_header".to_string()));
    }
}
