use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use vt_api::{config, create_app, AppState};
use vt_core::repositories::UserRepository;
use vt_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, TokenService, TokenServiceConfig,
};
use vt_infra::database::{DatabasePool, MySqlUserRepository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load()?;
    config::init_logger(&app_config.logging);

    info!(
        "Starting Vidtube API Server ({} environment)",
        app_config.environment
    );

    let db = DatabasePool::new(app_config.database.clone())
        .await
        .context("failed to connect to the database")?;
    db.ensure_schema()
        .await
        .context("failed to prepare the database schema")?;

    let user_repository = Arc::new(MySqlUserRepository::new(db.get_pool().clone()));
    let auth_service = build_auth_service(user_repository, &app_config);
    let app_state = web::Data::new(AppState::new(
        auth_service,
        app_config.auth.cookies.clone(),
    ));

    let bind_address = app_config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server_config = app_config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &server_config));
    if app_config.server.workers > 0 {
        server = server.workers(app_config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

fn build_auth_service<U>(
    user_repository: Arc<U>,
    app_config: &vt_shared::AppConfig,
) -> Arc<AuthService<U, BcryptPasswordHasher>>
where
    U: UserRepository + 'static,
{
    let token_service = Arc::new(TokenService::new(
        Arc::clone(&user_repository),
        TokenServiceConfig::from(&app_config.auth.jwt),
    ));

    Arc::new(AuthService::new(
        user_repository,
        token_service,
        Arc::new(BcryptPasswordHasher::new(app_config.auth.password_hash_cost)),
        AuthServiceConfig::default(),
    ))
}
