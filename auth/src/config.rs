use std::fmt;

use jsonwebtoken::Algorithm;
use serde::Deserialize;

use crate::errors::ConfigError;

/// Authentication settings, embedded by services in their own configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub token: TokenConfig,
    #[serde(default)]
    pub hashing: HashingConfig,
}

/// Token signing settings.
#[derive(Clone, Deserialize)]
pub struct TokenConfig {
    /// Symmetric signing secret
    pub secret: String,

    /// Signing algorithm name (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Seconds between issuance and expiry
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_ttl_seconds() -> i64 {
    24 * 60 * 60
}

impl TokenConfig {
    /// Longest accepted token lifetime (one year).
    pub const MAX_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

    /// Create token settings with the default algorithm and TTL.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: default_algorithm(),
            ttl_seconds: default_ttl_seconds(),
        }
    }

    /// Set the signing algorithm name.
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Set the token lifetime in seconds.
    pub fn with_ttl_seconds(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Resolve the configured algorithm name.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Name is not one of the HMAC algorithms
    pub fn signing_algorithm(&self) -> Result<Algorithm, ConfigError> {
        match self.algorithm.to_ascii_uppercase().as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            _ => Err(ConfigError::UnsupportedAlgorithm(self.algorithm.clone())),
        }
    }

    pub(crate) fn validate(&self) -> Result<Algorithm, ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if self.ttl_seconds <= 0 || self.ttl_seconds > Self::MAX_TTL_SECONDS {
            return Err(ConfigError::InvalidTtl(self.ttl_seconds));
        }
        self.signing_algorithm()
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct HashingConfig {
    /// Number of passes over memory
    pub time_cost: u32,

    /// Memory size in KiB
    pub memory_cost: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashingConfig {
    pub fn new(time_cost: u32, memory_cost: u32, parallelism: u32) -> Self {
        Self {
            time_cost,
            memory_cost,
            parallelism,
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            time_cost: 2,
            memory_cost: 102_400,
            parallelism: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_config_defaults() {
        let config = TokenConfig::new("secret");

        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.ttl_seconds, 86_400);
        assert_eq!(config.validate(), Ok(Algorithm::HS256));
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let config = TokenConfig::new("secret").with_algorithm("RS256");

        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedAlgorithm("RS256".to_string()))
        );
    }

    #[test]
    fn test_rejects_empty_secret_and_bad_ttl() {
        assert_eq!(
            TokenConfig::new("").validate(),
            Err(ConfigError::EmptySecret)
        );
        assert_eq!(
            TokenConfig::new("secret").with_ttl_seconds(0).validate(),
            Err(ConfigError::InvalidTtl(0))
        );
    }

    #[test]
    fn test_rejects_oversized_ttl() {
        assert_eq!(
            TokenConfig::new("secret")
                .with_ttl_seconds(i64::MAX)
                .validate(),
            Err(ConfigError::InvalidTtl(i64::MAX))
        );
        assert!(TokenConfig::new("secret")
            .with_ttl_seconds(TokenConfig::MAX_TTL_SECONDS)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = TokenConfig::new("super-secret-value");
        let printed = format!("{:?}", config);

        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("REDACTED"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: AuthConfig = serde_json::from_value(serde_json::json!({
            "token": { "secret": "abc" }
        }))
        .unwrap();

        assert_eq!(config.token.algorithm, "HS256");
        assert_eq!(config.token.ttl_seconds, 86_400);
        assert_eq!(config.hashing, HashingConfig::default());
    }
}
