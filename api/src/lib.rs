//! # Vidtube API
//!
//! HTTP surface of the Vidtube backend: account registration, login,
//! session rotation and the session middleware guarding protected routes.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;
