//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access and refresh token signing with independent secrets
//! - Access token verification
//! - Refresh token rotation against the single stored value
//! - Session revocation

mod config;
mod service;
mod signer;


pub use config::TokenServiceConfig;
pub use service::TokenService;
pub use signer::JwtSigner;
