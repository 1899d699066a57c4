use crate::error::AppError;

/// Username of the built-in demo account.
pub const DEFAULT_USERNAME: &str = "omer.faruk@email.com";
/// Password of the built-in demo account.
pub const DEFAULT_PASSWORD: &str = "Password123";
/// Account id written into the `Id` claim. There is only the one configured account.
pub const ACCOUNT_ID: &str = "1";

const DEFAULT_TTL_MINUTES: i64 = 5;
/// Longest accepted token lifetime (one year).
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Signing and validation parameters for bearer tokens.
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret.
    pub key: String,
    pub issuer: String,
    pub audience: String,
    /// Lifetime written into the `exp` claim of issued tokens.
    pub ttl_minutes: i64,
    /// Reject tokens whose `exp` has passed. Off unless explicitly enabled.
    pub validate_lifetime: bool,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_minutes", &self.ttl_minutes)
            .field("validate_lifetime", &self.validate_lifetime)
            .finish()
    }
}

impl JwtConfig {
    /// Read configuration from environment variables.
    ///
    /// - `JWT_KEY` (required, non-empty)
    /// - `JWT_ISSUER` (required)
    /// - `JWT_AUDIENCE` (required)
    /// - `JWT_TTL_MINUTES` (optional, defaults to 5, at most [`MAX_TTL_MINUTES`])
    /// - `JWT_VALIDATE_LIFETIME` (optional, defaults to false)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`JwtConfig::from_env`] but reads values through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let key = required(&lookup, "JWT_KEY")?;
        let issuer = required(&lookup, "JWT_ISSUER")?;
        let audience = required(&lookup, "JWT_AUDIENCE")?;

        let ttl_minutes = match lookup("JWT_TTL_MINUTES") {
            None => DEFAULT_TTL_MINUTES,
            Some(raw) => {
                let parsed: i64 = raw.parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "Invalid JWT_TTL_MINUTES '{raw}': must be a positive integer"
                    ))
                })?;
                if parsed <= 0 {
                    return Err(AppError::ConfigError(
                        "JWT_TTL_MINUTES must be at least 1".into(),
                    ));
                }
                if parsed > MAX_TTL_MINUTES {
                    return Err(AppError::ConfigError(format!(
                        "JWT_TTL_MINUTES must be at most {MAX_TTL_MINUTES}"
                    )));
                }
                parsed
            }
        };

        let validate_lifetime = match lookup("JWT_VALIDATE_LIFETIME") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::ConfigError(format!(
                    "Invalid JWT_VALIDATE_LIFETIME '{raw}': expected true or false"
                ))
            })?,
        };

        Ok(Self {
            key,
            issuer,
            audience,
            ttl_minutes,
            validate_lifetime,
        })
    }
}

/// The single account accepted at login.
#[derive(Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl AuthConfig {
    /// Read `TODO_AUTH_USERNAME` / `TODO_AUTH_PASSWORD`, falling back to the demo account.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            username: lookup("TODO_AUTH_USERNAME").unwrap_or(defaults.username),
            password: lookup("TODO_AUTH_PASSWORD").unwrap_or(defaults.password),
        }
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, AppError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::ConfigError(format!("{name} not set"))),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
