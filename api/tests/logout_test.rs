mod common;

use actix_web::{cookie::Cookie, http::StatusCode, test};
use serde_json::{json, Value};

use common::{response_cookie, TestContext, PASSWORD};
use vt_api::create_app;

#[actix_web::test]
async fn test_logout_clears_session() {
    let ctx = TestContext::new();
    let user = ctx.register("chai").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({ "username": "chai", "password": PASSWORD }))
        .to_request();
    let login: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let access = login["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = login["data"]["refresh_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/users/logout")
        .cookie(Cookie::new("accessToken", access.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    for name in ["accessToken", "refreshToken"] {
        let cookie = response_cookie(&resp, name).expect("removal cookie");
        assert_eq!(cookie.value(), "");
        assert_eq!(
            cookie.max_age(),
            Some(actix_web::cookie::time::Duration::ZERO)
        );
    }
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["logged_out"], true);

    let stored = ctx.repo.get(user.id).await.unwrap();
    assert!(stored.refresh_token.is_none());

    // The refresh token no longer matches the stored value
    let req = test::TestRequest::post()
        .uri("/api/v1/users/refresh-token")
        .set_json(json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_STALE");

    // Access tokens stay valid until they expire
    let req = test::TestRequest::get()
        .uri("/api/v1/users/current-user")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_logout_requires_authentication() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/logout")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_store_failure_is_server_error() {
    let ctx = TestContext::new();
    let user = ctx.register("chai").await;
    let pair = ctx
        .state
        .auth_service
        .token_service()
        .issue_pair(user.id)
        .await
        .unwrap();
    ctx.repo.set_fail_writes(true);
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/logout")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DATABASE_ERROR");
    assert!(ctx.repo.get(user.id).await.unwrap().refresh_token.is_some());
}
