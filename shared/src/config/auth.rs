//! Authentication and session configuration

use serde::{Deserialize, Serialize};

const DEFAULT_ACCESS_SECRET: &str = "access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "refresh-secret-change-in-production";

/// Upper bound for any token lifetime (10 years)
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 10 * 365 * 86_400;

/// JWT signing configuration
///
/// Access and refresh tokens are signed with independent secrets and carry
/// independent lifetimes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    pub access_token_secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Secret used to sign refresh tokens
    pub refresh_token_secret: String,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::from(DEFAULT_ACCESS_SECRET),
            access_token_expiry: 900,       // 15 minutes
            refresh_token_secret: String::from(DEFAULT_REFRESH_SECRET),
            refresh_token_expiry: 864_000,  // 10 days
            issuer: default_issuer(),
        }
    }
}

impl JwtConfig {
    /// Create a JWT configuration with both secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_token_secret: access_secret.into(),
            refresh_token_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86_400;
        self
    }

    /// Load from `ACCESS_TOKEN_*` / `REFRESH_TOKEN_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let access_token_expiry = std::env::var("ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| parse_expiry(&v))
            .unwrap_or(defaults.access_token_expiry);
        let refresh_token_expiry = std::env::var("REFRESH_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| parse_expiry(&v))
            .unwrap_or(defaults.refresh_token_expiry);

        Self {
            access_token_secret: std::env::var("ACCESS_TOKEN_SECRET")
                .unwrap_or(defaults.access_token_secret),
            access_token_expiry,
            refresh_token_secret: std::env::var("REFRESH_TOKEN_SECRET")
                .unwrap_or(defaults.refresh_token_secret),
            refresh_token_expiry,
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    /// Check if either secret is still the built-in default (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.access_token_secret == DEFAULT_ACCESS_SECRET
            || self.refresh_token_secret == DEFAULT_REFRESH_SECRET
    }

    /// Check that the two secrets differ
    pub fn has_distinct_secrets(&self) -> bool {
        self.access_token_secret != self.refresh_token_secret
    }

    /// Check that both lifetimes are positive and at most
    /// [`MAX_TOKEN_LIFETIME_SECONDS`]
    pub fn has_valid_lifetimes(&self) -> bool {
        is_valid_lifetime(self.access_token_expiry) && is_valid_lifetime(self.refresh_token_expiry)
    }
}

/// Whether `seconds` is a usable token lifetime
pub fn is_valid_lifetime(seconds: i64) -> bool {
    (1..=MAX_TOKEN_LIFETIME_SECONDS).contains(&seconds)
}

/// Cookie transport configuration for the credential pair
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie carrying the access token
    pub access_cookie_name: String,

    /// Cookie carrying the refresh token
    pub refresh_cookie_name: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,

    /// HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// Cookie path
    #[serde(default = "default_cookie_path")]
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: String::from("accessToken"),
            refresh_cookie_name: String::from("refreshToken"),
            secure: true,
            http_only: default_http_only(),
            path: default_cookie_path(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,

    /// bcrypt work factor for password hashing
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookies: CookieConfig::default(),
            password_hash_cost: default_password_hash_cost(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let password_hash_cost = std::env::var("PASSWORD_HASH_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_password_hash_cost);
        let cookies = CookieConfig {
            secure: std::env::var("COOKIE_SECURE")
                .map(|v| v != "false")
                .unwrap_or(true),
            ..Default::default()
        };

        Self {
            jwt: JwtConfig::from_env(),
            cookies,
            password_hash_cost,
        }
    }
}

/// Parse a token lifetime into seconds.
///
/// Accepts a bare number of seconds or a number followed by one of
/// `s`, `m`, `h`, `d`.
pub fn parse_expiry(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (digits, multiplier) = match value.chars().last()? {
        's' => (&value[..value.len() - 1], 1),
        'm' => (&value[..value.len() - 1], 60),
        'h' => (&value[..value.len() - 1], 3_600),
        'd' => (&value[..value.len() - 1], 86_400),
        c if c.is_ascii_digit() => (value, 1),
        _ => return None,
    };

    let amount: i64 = digits.trim().parse().ok()?;
    if amount <= 0 {
        return None;
    }
    amount
        .checked_mul(multiplier)
        .filter(|seconds| is_valid_lifetime(*seconds))
}

fn default_issuer() -> String {
    String::from("vidtube")
}

fn default_http_only() -> bool {
    true
}

fn default_cookie_path() -> String {
    String::from("/")
}

fn default_password_hash_cost() -> u32 {
    10
}
