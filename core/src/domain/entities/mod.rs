//! Domain entities representing core business objects.

pub mod token;
pub mod user;


// Re-export commonly used types
pub use token::{AccessClaims, RefreshClaims, TokenPair};
pub use user::{NewUser, PublicUser, User, UserFilter};
