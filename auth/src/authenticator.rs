use std::sync::Arc;

use crate::config::AuthConfig;
use crate::errors::AuthError;
use crate::errors::ConfigError;
use crate::jwt::CredentialClaims;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::PasswordPolicy;
use crate::resolver::IdentityResolver;
use crate::resolver::UserLookup;

/// Authentication coordinator combining password handling and token issuance.
///
/// Built once at startup from `AuthConfig` and shared by reference.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    password_policy: PasswordPolicy,
    token_codec: Arc<TokenCodec>,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Login operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `ConfigError` - Token or hashing settings are unusable
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(&config.hashing)?,
            password_policy: PasswordPolicy::new(),
            token_codec: Arc::new(TokenCodec::new(&config.token)?),
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// Malformed hashes are reported as a mismatch.
    pub fn verify_password(&self, hash: &str, password: &str) -> bool {
        self.password_hasher.verify(hash, password)
    }

    /// Validate password strength, reporting every violated rule.
    ///
    /// # Errors
    /// * `WeakPassword` - At least one strength rule failed
    pub fn validate_password_strength<'a>(
        &self,
        password: &'a str,
        username: Option<&str>,
    ) -> Result<&'a str, AuthError> {
        Ok(self
            .password_policy
            .validate_strength(password, username)?)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - Claims to sign into the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: CredentialClaims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(stored_hash, password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = self.token_codec.issue(claims)?;

        Ok(AuthenticationResult {
            access_token,
            expires_in: self.token_codec.ttl_seconds(),
        })
    }

    /// Reject a login whose account does not exist.
    ///
    /// Spends one full password verification first, so callers cannot tell
    /// an unknown account from a wrong password by response time.
    pub fn reject_unknown_user(&self, password: &str) -> AuthError {
        self.password_hasher.verify_placeholder(password);
        AuthError::InvalidCredentials
    }

    /// Issue an access token without password verification.
    ///
    /// # Errors
    /// * `MissingSubject` - Claims carry an empty subject
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, claims: CredentialClaims) -> Result<String, JwtError> {
        self.token_codec.issue(claims)
    }

    /// Build an identity resolver sharing this authenticator's codec.
    pub fn resolver<L: UserLookup>(&self, lookup: Arc<L>) -> IdentityResolver<L> {
        IdentityResolver::new(Arc::clone(&self.token_codec), lookup)
    }
}
