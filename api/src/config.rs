//! Configuration and logger bootstrap for the api binary

use anyhow::Context;
use vt_shared::{AppConfig, LoggingConfig};

/// Load the layered application configuration
pub fn load() -> anyhow::Result<AppConfig> {
    vt_infra::config::load_app_config().context("failed to load configuration")
}

/// Initialize `env_logger`; `RUST_LOG` overrides the configured level
pub fn init_logger(logging: &LoggingConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::new().default_filter_or(&logging.level));
    if !logging.timestamp {
        builder.format_timestamp(None);
    }
    // A second init (tests) is not an error
    let _ = builder.try_init();
}
