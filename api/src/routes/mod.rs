//! HTTP route handlers
//!
//! - `health` - liveness probe
//! - `users` - account and session endpoints

pub mod health;
pub mod users;

pub use users::AppState;
