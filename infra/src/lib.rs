//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Vidtube backend.
//! It provides the concrete pieces the domain layer only describes as traits.
//!
//! ## Architecture
//!
//! - **Database**: MySQL pool and `UserRepository` implementation using SQLx
//! - **Config**: layered application configuration loading
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use vt_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Configuration loading for the application binary
pub mod config;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration source could not be read or deserialized
    #[error("Configuration error: {0}")]
    ConfigLoad(#[from] ::config::ConfigError),
}
