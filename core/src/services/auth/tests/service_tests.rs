//! Unit tests for the authentication service

use std::sync::Arc;

use crate::domain::entities::user::NewUser;
use crate::domain::value_objects::LoginInput;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::MockUserRepository;
use crate::services::auth::{AuthService, AuthServiceConfig, BcryptPasswordHasher};
use crate::services::token::{TokenService, TokenServiceConfig};

fn create_service() -> (AuthService<MockUserRepository, BcryptPasswordHasher>, MockUserRepository) {
    let repo = MockUserRepository::new();
    let shared = Arc::new(repo.clone());
    let token_service = Arc::new(TokenService::new(
        shared.clone(),
        TokenServiceConfig::with_secrets("access-secret", "refresh-secret"),
    ));
    let service = AuthService::new(
        shared,
        token_service,
        Arc::new(BcryptPasswordHasher::new(4)),
        AuthServiceConfig::default(),
    );
    (service, repo)
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        full_name: "Chai Aur Code".to_string(),
        password: "password123".to_string(),
        avatar: "https://media.example.com/a.png".to_string(),
        cover_image: None,
    }
}

fn login_with_username(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: Some(username.to_string()),
        email: None,
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_register_normalizes_username_and_hashes_password() {
    let (service, repo) = create_service();

    let user = service
        .register(new_user("  Chai.Code ", "chai@example.com"))
        .await
        .unwrap();

    assert_eq!(user.username, "chai.code");
    let stored = repo.get(user.id).await.unwrap();
    assert_ne!(stored.password_hash, "password123");
    assert!(stored.password_hash.starts_with("$2"));
    assert!(stored.refresh_token.is_none());
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let (service, _repo) = create_service();
    service
        .register(new_user("chai", "chai@example.com"))
        .await
        .unwrap();

    let same_username = service
        .register(new_user("CHAI", "other@example.com"))
        .await;
    assert!(matches!(
        same_username,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));

    let same_email = service
        .register(new_user("other", "chai@example.com"))
        .await;
    assert!(matches!(
        same_email,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let (service, repo) = create_service();
    let mut input = new_user("chai", "chai@example.com");
    input.full_name = "   ".to_string();
    input.avatar = String::new();

    let result = service.register(input).await;

    match result {
        Err(DomainError::Validation { message }) => {
            assert!(message.contains("full_name"));
            assert!(message.contains("avatar"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(repo.read_count(), 0);
}

#[tokio::test]
async fn test_register_rejects_malformed_input() {
    let (service, _repo) = create_service();

    let bad_email = service.register(new_user("chai", "not-an-email")).await;
    assert!(matches!(bad_email, Err(DomainError::Validation { .. })));

    let bad_username = service
        .register(new_user("no spaces allowed", "chai@example.com"))
        .await;
    assert!(matches!(bad_username, Err(DomainError::Validation { .. })));

    let mut short_password = new_user("chai", "chai@example.com");
    short_password.password = "short".to_string();
    let result = service.register(short_password).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_login_by_username_or_email() {
    let (service, repo) = create_service();
    let user = service
        .register(new_user("chai", "chai@example.com"))
        .await
        .unwrap();

    let by_username = service
        .login(login_with_username("Chai", "password123"))
        .await
        .unwrap();
    assert_eq!(by_username.user.id, user.id);

    let by_email = service
        .login(LoginInput {
            username: None,
            email: Some("chai@example.com".to_string()),
            password: "password123".to_string(),
        })
        .await
        .unwrap();

    // The second login replaced the first session
    let stored = repo.get(user.id).await.unwrap();
    assert_eq!(stored.refresh_token, Some(by_email.refresh_token.clone()));
    assert_ne!(by_username.refresh_token, by_email.refresh_token);
}

#[tokio::test]
async fn test_login_failures() {
    let (service, _repo) = create_service();
    service
        .register(new_user("chai", "chai@example.com"))
        .await
        .unwrap();

    let unknown = service
        .login(login_with_username("nobody", "password123"))
        .await;
    assert!(matches!(unknown, Err(DomainError::Auth(AuthError::UserNotFound))));

    let wrong_password = service
        .login(login_with_username("chai", "password124"))
        .await;
    assert!(matches!(
        wrong_password,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));

    let no_identifier = service
        .login(LoginInput {
            username: None,
            email: Some("  ".to_string()),
            password: "password123".to_string(),
        })
        .await;
    assert!(matches!(no_identifier, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_logout_then_refresh_is_stale() {
    let (service, _repo) = create_service();
    let user = service
        .register(new_user("chai", "chai@example.com"))
        .await
        .unwrap();
    let session = service
        .login(login_with_username("chai", "password123"))
        .await
        .unwrap();

    service.logout(user.id).await.unwrap();

    let result = service.refresh(Some(&session.refresh_token)).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::StaleCredential))
    ));

    // Access token stays valid until it expires
    let claims = service
        .token_service()
        .verify_access(&session.access_token)
        .unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
}

#[tokio::test]
async fn test_refresh_returns_user_and_rotated_tokens() {
    let (service, _repo) = create_service();
    let user = service
        .register(new_user("chai", "chai@example.com"))
        .await
        .unwrap();
    let session = service
        .login(login_with_username("chai", "password123"))
        .await
        .unwrap();

    let refreshed = service.refresh(Some(&session.refresh_token)).await.unwrap();

    assert_eq!(refreshed.user.id, user.id);
    assert_ne!(refreshed.refresh_token, session.refresh_token);
}

#[tokio::test]
async fn test_current_user() {
    let (service, _repo) = create_service();
    let user = service
        .register(new_user("chai", "chai@example.com"))
        .await
        .unwrap();

    let found = service.current_user(user.id).await.unwrap();
    assert_eq!(found.email, "chai@example.com");

    let missing = service.current_user(uuid::Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_email_is_case_insensitive() {
    let (service, _repo) = create_service();
    let user = service
        .register(new_user("chai", " Chai@Example.COM "))
        .await
        .unwrap();
    assert_eq!(user.email, "chai@example.com");

    let duplicate = service
        .register(new_user("someone", "CHAI@example.com"))
        .await;
    assert!(matches!(
        duplicate,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));

    let session = service
        .login(LoginInput {
            username: None,
            email: Some("chai@EXAMPLE.com".to_string()),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.user.id, user.id);
}

#[tokio::test]
async fn test_login_prefers_username_over_email() {
    let (service, _repo) = create_service();
    let first = service
        .register(new_user("first", "first@example.com"))
        .await
        .unwrap();
    let second = service
        .register(new_user("second", "second@example.com"))
        .await
        .unwrap();

    // Username and email name different accounts
    for _ in 0..5 {
        let session = service
            .login(LoginInput {
                username: Some("first".to_string()),
                email: Some("second@example.com".to_string()),
                password: "password123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(session.user.id, first.id);
    }

    // Unknown username falls back to the email
    let session = service
        .login(LoginInput {
            username: Some("nobody".to_string()),
            email: Some("second@example.com".to_string()),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.user.id, second.id);
}
