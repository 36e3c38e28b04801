use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::CredentialClaims;
use super::errors::JwtError;
use crate::config::TokenConfig;
use crate::errors::AuthError;
use crate::errors::ConfigError;

/// Signs claim sets into tokens and verifies them back.
///
/// Secret, algorithm and TTL are fixed at construction. Expiry is enforced
/// through the `expires_at` claim the codec stamps itself; the library's
/// registered `exp` handling is switched off.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl_seconds: i64,
}

impl TokenCodec {
    /// Create a codec from token settings.
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is empty
    /// * `InvalidTtl` - TTL is not positive or exceeds `TokenConfig::MAX_TTL_SECONDS`
    /// * `UnsupportedAlgorithm` - Algorithm is not HS256, HS384 or HS512
    pub fn new(config: &TokenConfig) -> Result<Self, ConfigError> {
        let algorithm = config.validate()?;
        let secret = config.secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            ttl_seconds: config.ttl_seconds,
        })
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a token for `claims`, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `MissingSubject` - Claims carry an empty subject
    /// * `ExpiryOverflow` - `now + ttl` does not fit a timestamp
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: CredentialClaims) -> Result<String, JwtError> {
        self.issue_at(claims, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix timestamp).
    ///
    /// Overwrites `iat` and `expires_at` so that
    /// `expires_at == iat + ttl_seconds` always holds for issued tokens.
    pub fn issue_at(&self, mut claims: CredentialClaims, now: i64) -> Result<String, JwtError> {
        if claims.sub.is_empty() {
            return Err(JwtError::MissingSubject);
        }

        let expires_at = now
            .checked_add(self.ttl_seconds)
            .ok_or(JwtError::ExpiryOverflow)?;

        claims.iat = Some(now);
        claims.expires_at = Some(expires_at);

        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claim set.
    ///
    /// # Errors
    /// * `TokenMissing` - Token is empty
    /// * `TokenExpired` - Signature is valid but `expires_at` has passed
    /// * `TokenInvalid` - Bad signature, malformed structure, wrong algorithm,
    ///   or no usable `expires_at`
    pub fn verify(&self, token: &str) -> Result<CredentialClaims, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (Unix timestamp).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<CredentialClaims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::TokenMissing);
        }

        let token_data = decode::<CredentialClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                kind => {
                    tracing::debug!(error = ?kind, "Token decoding failed");
                    AuthError::TokenInvalid
                }
            })?;

        let claims = token_data.claims;
        match claims.is_expired(now) {
            Some(false) => Ok(claims),
            Some(true) => Err(AuthError::TokenExpired),
            None => {
                tracing::debug!("Token carries no expires_at claim");
                Err(AuthError::TokenInvalid)
            }
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Expiry lives in `expires_at`, not the registered `exp` claim
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "my_secret_key_at_least_32_bytes_long!";
    const T0: i64 = 1_700_000_000;

    fn codec_with_ttl(ttl: i64) -> TokenCodec {
        TokenCodec::new(&TokenConfig::new(SECRET).with_ttl_seconds(ttl)).unwrap()
    }

    fn claims() -> CredentialClaims {
        CredentialClaims::new("alice@example.com")
            .with_user_id("42")
            .with_role("user")
            .with_verified(true)
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = codec_with_ttl(3600);

        let token = codec.issue(claims()).expect("Failed to issue token");
        assert!(!token.is_empty());

        let decoded = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(decoded.sub, "alice@example.com");
        assert_eq!(decoded.user_id.as_deref(), Some("42"));
        assert_eq!(decoded.role.as_deref(), Some("user"));
        assert_eq!(decoded.is_verified, Some(true));
    }

    #[test]
    fn test_issue_stamps_expiry_from_ttl() {
        let codec = codec_with_ttl(60);

        let token = codec.issue_at(claims(), T0).unwrap();
        let decoded = codec.verify_at(&token, T0).unwrap();

        assert_eq!(decoded.iat, Some(T0));
        assert_eq!(decoded.expires_at, Some(T0 + 60));
    }

    #[test]
    fn test_issue_overrides_caller_expiry() {
        let codec = codec_with_ttl(60);

        let token = codec
            .issue_at(claims().with_expires_at(T0 + 1_000_000), T0)
            .unwrap();
        let decoded = codec.verify_at(&token, T0).unwrap();

        assert_eq!(decoded.expires_at, Some(T0 + 60));
    }

    #[test]
    fn test_expiry_boundary() {
        let codec = codec_with_ttl(60);
        let token = codec.issue_at(claims(), T0).unwrap();

        assert!(codec.verify_at(&token, T0 + 60).is_ok());
        assert_eq!(
            codec.verify_at(&token, T0 + 61),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn test_issue_requires_subject() {
        let codec = codec_with_ttl(60);

        let result = codec.issue(CredentialClaims::default());
        assert_eq!(result, Err(JwtError::MissingSubject));
    }

    #[test]
    fn test_verify_empty_token_is_missing() {
        let codec = codec_with_ttl(60);

        assert_eq!(codec.verify(""), Err(AuthError::TokenMissing));
        assert_eq!(codec.verify("   "), Err(AuthError::TokenMissing));
    }

    #[test]
    fn test_verify_garbage_is_invalid() {
        let codec = codec_with_ttl(60);

        assert_eq!(
            codec.verify("invalid.token.here"),
            Err(AuthError::TokenInvalid)
        );
        assert_eq!(codec.verify("garbage"), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let codec = codec_with_ttl(3600);
        let token = codec.issue_at(claims(), T0).unwrap();

        let signature_start = token.rfind('.').unwrap() + 1;
        let signature_len = token.len() - signature_start;

        for offset in [0, signature_len / 2, signature_len - 2] {
            let mut bytes = token.clone().into_bytes();
            let index = signature_start + offset;
            bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert_eq!(
                codec.verify_at(&tampered, T0),
                Err(AuthError::TokenInvalid),
                "tampered at signature offset {}",
                offset
            );
        }
    }

    #[test]
    fn test_verify_with_wrong_secret_is_invalid() {
        let issuer = codec_with_ttl(3600);
        let verifier =
            TokenCodec::new(&TokenConfig::new("another_secret_at_least_32_bytes!!")).unwrap();

        let token = issuer.issue_at(claims(), T0).unwrap();
        assert_eq!(verifier.verify_at(&token, T0), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_verify_with_other_algorithm_is_invalid() {
        let issuer =
            TokenCodec::new(&TokenConfig::new(SECRET).with_algorithm("HS512")).unwrap();
        let verifier = codec_with_ttl(3600);

        let token = issuer.issue_at(claims(), T0).unwrap();
        assert_eq!(verifier.verify_at(&token, T0), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_token_without_expires_at_is_invalid() {
        let codec = codec_with_ttl(3600);

        // Signed with the right key but bypassing `issue`
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims(),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec.verify_at(&token, T0), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_unparseable_expires_at_is_invalid() {
        let codec = codec_with_ttl(3600);

        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "sub": "alice@example.com", "expires_at": "tomorrow" }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec.verify_at(&token, T0), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_issue_rejects_expiry_overflow() {
        let codec = codec_with_ttl(3600);

        let result = codec.issue_at(claims(), i64::MAX - 10);
        assert_eq!(result, Err(JwtError::ExpiryOverflow));
    }

    #[test]
    fn test_max_ttl_issues_valid_token() {
        let codec = codec_with_ttl(TokenConfig::MAX_TTL_SECONDS);

        let token = codec.issue(claims()).expect("Failed to issue token");
        assert!(codec.verify(&token).is_ok());
    }
}
