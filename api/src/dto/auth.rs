use serde::{Deserialize, Serialize};
use validator::Validate;

use vt_core::domain::entities::NewUser;
use vt_core::domain::value_objects::LoginInput;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Normalized to lowercase by the service
    #[serde(default)]
    #[validate(length(max = 30))]
    pub username: String,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub email: String,

    #[serde(default, alias = "fullName")]
    #[validate(length(max = 255))]
    pub full_name: String,

    #[serde(default)]
    pub password: String,

    /// Media-host URL of an already uploaded avatar
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub avatar: String,

    #[serde(default, alias = "coverImage")]
    #[validate(length(max = 2048))]
    pub cover_image: Option<String>,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            username: request.username,
            email: request.email,
            full_name: request.full_name,
            password: request.password,
            avatar: request.avatar,
            cover_image: request.cover_image,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(max = 128))]
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(request: LoginRequest) -> Self {
        LoginInput {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}
