//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing, lifetimes and cookie transport
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{is_valid_lifetime, parse_expiry, AuthConfig, CookieConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8000),
            database: DatabaseConfig::new("mysql://localhost:3306/vidtube_dev"),
            auth: AuthConfig {
                cookies: CookieConfig {
                    secure: false,
                    ..Default::default()
                },
                ..Default::default()
            },
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut cors = CorsConfig::from_env();
        if cors.allowed_origins.is_empty() && environment.is_development() {
            cors = CorsConfig::development();
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cors,
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config_uses_insecure_cookies() {
        let config = AppConfig::development();
        assert!(!config.auth.cookies.secure);
        assert!(config.cors.allows_any_origin());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let json = serde_json::json!({
            "server": { "host": "127.0.0.1", "port": 9001 }
        });
        let config: AppConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.auth.jwt.access_token_expiry, 900);
    }
}
