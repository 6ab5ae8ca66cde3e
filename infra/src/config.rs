//! Layered configuration loading
//!
//! Precedence, lowest first:
//! 1. Built-in defaults and legacy environment variables (`AppConfig::from_env`)
//! 2. Optional `config.<environment>.toml` in the working directory
//! 3. `APP__SECTION__KEY` environment variables

use std::path::Path;

use ::config::{Config, Environment as EnvSource, File, FileFormat};
use vt_shared::config::auth::MAX_TOKEN_LIFETIME_SECONDS;
use vt_shared::AppConfig;

use crate::InfrastructureError;

/// Load configuration from `.env`, an optional file and the environment
pub fn load_app_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let defaults = AppConfig::from_env();
    let file_name = defaults.environment.config_file().to_string();
    load_layered(defaults, Path::new(&file_name))
}

/// Layer `file` and `APP__*` variables over `defaults`
pub fn load_layered(defaults: AppConfig, file: &Path) -> Result<AppConfig, InfrastructureError> {
    let settings = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::from(file).format(FileFormat::Toml).required(false))
        .add_source(EnvSource::with_prefix("APP").separator("__"))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;

    if config.environment.is_production() && config.auth.jwt.is_using_default_secret() {
        return Err(InfrastructureError::Config(
            "token secrets must be set in production".to_string(),
        ));
    }
    if !config.auth.jwt.has_valid_lifetimes() {
        return Err(InfrastructureError::Config(format!(
            "token lifetimes must be between 1 and {} seconds (access: {}, refresh: {})",
            MAX_TOKEN_LIFETIME_SECONDS,
            config.auth.jwt.access_token_expiry,
            config.auth.jwt.refresh_token_expiry,
        )));
    }
    if !config.auth.jwt.has_distinct_secrets() {
        tracing::warn!("Access and refresh token secrets are identical");
    }

    tracing::info!(environment = %config.environment, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_keeps_defaults() {
        let defaults = AppConfig::development();
        let loaded = load_layered(
            defaults.clone(),
            Path::new("does-not-exist/config.development.toml"),
        )
        .unwrap();

        assert_eq!(loaded.server.port, defaults.server.port);
        assert_eq!(
            loaded.auth.jwt.access_token_expiry,
            defaults.auth.jwt.access_token_expiry
        );
        assert!(!loaded.auth.cookies.secure);
    }

    #[test]
    fn test_out_of_range_lifetimes_rejected() {
        let missing = Path::new("does-not-exist/config.development.toml");

        let mut negative = AppConfig::development();
        negative.auth.jwt.access_token_expiry = -1;
        assert!(matches!(
            load_layered(negative, missing),
            Err(InfrastructureError::Config(_))
        ));

        let mut zero = AppConfig::development();
        zero.auth.jwt.refresh_token_expiry = 0;
        assert!(matches!(
            load_layered(zero, missing),
            Err(InfrastructureError::Config(_))
        ));

        let mut huge = AppConfig::development();
        huge.auth.jwt.refresh_token_expiry = 8_640_000_000_000;
        assert!(matches!(
            load_layered(huge, missing),
            Err(InfrastructureError::Config(_))
        ));
    }
}
