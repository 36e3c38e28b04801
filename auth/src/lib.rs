//! Authentication core library
//!
//! Provides the token and password machinery shared by services:
//! - Token issuance and verification (`TokenCodec`, HMAC-signed JWT)
//! - Request-time identity resolution (`IdentityResolver`)
//! - Password hashing (Argon2id) and strength validation
//!
//! Services supply a `UserLookup` implementation and map `AuthError` kinds
//! onto their transport.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingConfig, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(&HashingConfig::new(1, 1024, 1)).unwrap();
//! let hash = hasher.hash("Secret123!").unwrap();
//! assert!(hasher.verify(&hash, "Secret123!"));
//! assert!(!hasher.verify("not-a-real-hash", "Secret123!"));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{CredentialClaims, TokenCodec, TokenConfig};
//!
//! let codec = TokenCodec::new(&TokenConfig::new("secret_key_at_least_32_bytes_long!")).unwrap();
//! let token = codec.issue(CredentialClaims::new("alice@example.com")).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! ```
//!
//! ## Password Strength
//! ```
//! use auth::PasswordPolicy;
//!
//! let weak = PasswordPolicy::new().validate_strength("abc", None).unwrap_err();
//! assert_eq!(weak.reasons.len(), 4);
//! ```

pub mod authenticator;
pub mod config;
pub mod errors;
pub mod jwt;
pub mod password;
pub mod resolver;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use config::HashingConfig;
pub use config::TokenConfig;
pub use errors::AuthError;
pub use errors::ConfigError;
pub use errors::WeakPassword;
pub use jwt::CredentialClaims;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use resolver::extract_bearer;
pub use resolver::Identity;
pub use resolver::IdentityResolver;
pub use resolver::UserLookup;
pub use resolver::UserRecord;
