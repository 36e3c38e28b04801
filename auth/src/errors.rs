use std::fmt;

use thiserror::Error;

/// Failure kinds surfaced to the boundary layer.
///
/// Every authentication or password-policy failure ends up as exactly one of
/// these variants. None of them is transient, so callers must not retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token is missing")]
    TokenMissing,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Weak password: {0}")]
    WeakPassword(WeakPassword),
}

impl AuthError {
    /// Stable machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::TokenMissing => "token_missing",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenInvalid => "token_invalid",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::WeakPassword(_) => "weak_password",
        }
    }
}

/// Every strength rule a password violated, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeakPassword {
    pub reasons: Vec<String>,
}

impl fmt::Display for WeakPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reasons.join("; "))
    }
}

impl From<WeakPassword> for AuthError {
    fn from(weak: WeakPassword) -> Self {
        AuthError::WeakPassword(weak)
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Token signing secret must not be empty")]
    EmptySecret,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token TTL must be between 1 second and one year, got {0}")]
    InvalidTtl(i64),

    #[error("Invalid hashing parameters: {0}")]
    InvalidHashingParams(String),
}
