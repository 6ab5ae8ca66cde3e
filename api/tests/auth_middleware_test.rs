mod common;

use actix_web::{cookie::Cookie, http::StatusCode, test};
use serde_json::Value;

use common::{TestContext, ACCESS_SECRET, REFRESH_SECRET};
use vt_api::create_app;
use vt_core::domain::entities::AccessClaims;
use vt_core::repositories::UserRepository;
use vt_core::services::JwtSigner;

async fn issue_access(ctx: &TestContext, user_id: uuid::Uuid) -> (String, String) {
    let pair = ctx
        .state
        .auth_service
        .token_service()
        .issue_pair(user_id)
        .await
        .unwrap();
    (pair.access_token, pair.refresh_token)
}

#[actix_web::test]
async fn test_missing_token_rejected_before_store_access() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let reads_before = ctx.repo.read_count();

    let req = test::TestRequest::get()
        .uri("/api/v1/users/current-user")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.repo.read_count(), reads_before);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_bearer_header_authenticates() {
    let ctx = TestContext::new();
    let user = ctx.register("chai").await;
    let (access, _) = issue_access(&ctx, user.id).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/current-user")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], user.id.to_string());
    assert_eq!(body["data"]["username"], "chai");
}

#[actix_web::test]
async fn test_cookie_authenticates_and_wins_over_header() {
    let ctx = TestContext::new();
    let user = ctx.register("chai").await;
    let (access, _) = issue_access(&ctx, user.id).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/current-user")
        .cookie(Cookie::new("accessToken", access))
        .insert_header(("Authorization", "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_invalid_tokens_rejected() {
    let ctx = TestContext::new();
    let user = ctx.register("chai").await;
    let (_, refresh) = issue_access(&ctx, user.id).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    // Malformed, and a refresh token presented as an access token
    for token in ["garbage".to_string(), refresh] {
        let req = test::TestRequest::get()
            .uri("/api/v1/users/current-user")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "TOKEN_INVALID");
    }
}

#[actix_web::test]
async fn test_expired_token_rejected() {
    let ctx = TestContext::new();
    let user = ctx.register("chai").await;
    let stored = ctx.repo.get(user.id).await.unwrap();
    let issuer = ctx.state.auth_service.token_service().config().issuer.clone();

    let claims = AccessClaims::for_user(&stored, -120, &issuer).unwrap();
    let expired = JwtSigner::new(ACCESS_SECRET, &issuer).sign(&claims).unwrap();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/current-user")
        .insert_header(("Authorization", format!("Bearer {}", expired)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_EXPIRED");
}

#[actix_web::test]
async fn test_token_signed_with_wrong_secret_rejected() {
    let ctx = TestContext::new();
    let user = ctx.register("chai").await;
    let stored = ctx.repo.get(user.id).await.unwrap();
    let issuer = ctx.state.auth_service.token_service().config().issuer.clone();

    let claims = AccessClaims::for_user(&stored, 600, &issuer).unwrap();
    let forged = JwtSigner::new(REFRESH_SECRET, &issuer).sign(&claims).unwrap();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/current-user")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn test_deleted_user_rejected() {
    let ctx = TestContext::new();
    let user = ctx.register("chai").await;
    let (access, _) = issue_access(&ctx, user.id).await;
    assert!(ctx.repo.delete(user.id).await.unwrap());
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/current-user")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_INVALID");
}
