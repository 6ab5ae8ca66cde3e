//! Integration tests for the full session lifecycle through the public API

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vt_core::domain::entities::NewUser;
    use vt_core::domain::value_objects::LoginInput;
    use vt_core::errors::{DomainError, TokenError};
    use vt_core::repositories::MockUserRepository;
    use vt_core::services::{
        AuthService, AuthServiceConfig, BcryptPasswordHasher, TokenService, TokenServiceConfig,
    };
    use vt_shared::JwtConfig;

    fn build() -> AuthService<MockUserRepository, BcryptPasswordHasher> {
        let repo = Arc::new(MockUserRepository::new());
        let jwt = JwtConfig::new("integration-access", "integration-refresh");
        let token_service = Arc::new(TokenService::new(
            repo.clone(),
            TokenServiceConfig::from(&jwt),
        ));
        AuthService::new(
            repo,
            token_service,
            Arc::new(BcryptPasswordHasher::new(4)),
            AuthServiceConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_register_login_rotate_logout() {
        let service = build();
        let user = service
            .register(NewUser {
                username: "user1".to_string(),
                email: "user1@example.com".to_string(),
                full_name: "User One".to_string(),
                password: "correct horse".to_string(),
                avatar: "https://media.example.com/u1.png".to_string(),
                cover_image: Some("https://media.example.com/u1-cover.png".to_string()),
            })
            .await
            .unwrap();

        let login = service
            .login(LoginInput {
                username: Some("user1".to_string()),
                email: None,
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(login.user.cover_image.as_deref(), Some("https://media.example.com/u1-cover.png"));

        let second = service.refresh(Some(&login.refresh_token)).await.unwrap();
        let third = service.refresh(Some(&second.refresh_token)).await.unwrap();
        assert!(matches!(
            service.refresh(Some(&login.refresh_token)).await,
            Err(DomainError::Token(TokenError::StaleCredential))
        ));

        service.logout(user.id).await.unwrap();
        assert!(matches!(
            service.refresh(Some(&third.refresh_token)).await,
            Err(DomainError::Token(TokenError::StaleCredential))
        ));

        let claims = service
            .token_service()
            .verify_access(&third.access_token)
            .unwrap();
        assert_eq!(claims.username, "user1");
    }
}
