use std::sync::Arc;

use chrono::Utc;

use super::identity::Identity;
use super::ports::UserLookup;
use crate::errors::AuthError;
use crate::jwt::CredentialClaims;
use crate::jwt::TokenCodec;

/// Resolves bearer tokens to the principal making the request.
///
/// Holds no per-request state; each call runs presence check, token
/// verification, claim validation and user lookup in that order and stops at
/// the first failure.
pub struct IdentityResolver<L>
where
    L: UserLookup,
{
    codec: Arc<TokenCodec>,
    lookup: Arc<L>,
}

impl<L> IdentityResolver<L>
where
    L: UserLookup,
{
    /// Create a resolver over a codec and a user lookup.
    pub fn new(codec: Arc<TokenCodec>, lookup: Arc<L>) -> Self {
        Self { codec, lookup }
    }

    /// Verify a bearer token and resolve it to an identity.
    ///
    /// # Arguments
    /// * `token` - Raw token, already stripped of its scheme (empty if absent)
    ///
    /// # Returns
    /// Identity of the user the token's subject refers to
    ///
    /// # Errors
    /// * `TokenMissing` - Token is empty
    /// * `TokenExpired` - Token or claim set has expired
    /// * `TokenInvalid` - Token failed verification, or the lookup failed
    /// * `InvalidCredentials` - Subject is empty or refers to no user
    pub async fn verify_and_resolve(&self, token: &str) -> Result<Identity, AuthError> {
        self.resolve_at(token, Utc::now().timestamp()).await
    }

    /// Resolve as if the current time were `now` (Unix timestamp).
    pub async fn resolve_at(&self, token: &str, now: i64) -> Result<Identity, AuthError> {
        if token.trim().is_empty() {
            tracing::debug!("No token supplied");
            return Err(AuthError::TokenMissing);
        }

        let claims = self.codec.verify_at(token, now).map_err(|e| {
            tracing::debug!(kind = e.kind(), "Token verification failed");
            e
        })?;

        let subject = Self::validate_claims(&claims, now)?;

        let record = match self.lookup.find_by_subject(subject).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!("Token subject does not match any user");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::debug!(error = %e, "User lookup failed during authentication");
                return Err(AuthError::TokenInvalid);
            }
        };

        let identity = Identity::from(record);
        tracing::debug!(user_id = %identity.id, "User authenticated");

        Ok(identity)
    }

    /// Check the claims a request relies on, independently of the codec.
    ///
    /// Guards against claim sets that never went through `TokenCodec::issue`.
    ///
    /// # Returns
    /// The non-empty subject
    ///
    /// # Errors
    /// * `InvalidCredentials` - Subject is empty
    /// * `TokenExpired` - `expires_at` is absent or has passed
    pub fn validate_claims(claims: &CredentialClaims, now: i64) -> Result<&str, AuthError> {
        if claims.sub.is_empty() {
            tracing::debug!("Token has no subject");
            return Err(AuthError::InvalidCredentials);
        }

        match claims.is_expired(now) {
            Some(false) => Ok(&claims.sub),
            Some(true) | None => Err(AuthError::TokenExpired),
        }
    }
}

/// Extract the credentials of a `Bearer` authorization header.
///
/// An absent header, another scheme, or empty credentials all yield `""`,
/// so a missing token is reported as missing rather than invalid.
pub fn extract_bearer(authorization: Option<&str>) -> &str {
    authorization
        .map(str::trim)
        .and_then(|value| value.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, credentials)| credentials.trim())
        .unwrap_or("")
}
