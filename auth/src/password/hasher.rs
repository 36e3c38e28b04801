use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use crate::config::HashingConfig;
use crate::errors::ConfigError;

/// Password hashing implementation.
///
/// Argon2id with fixed cost parameters and a fresh random salt per hash.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Hash of a random secret, verified against when no stored hash exists
    placeholder_hash: String,
}

impl PasswordHasher {
    /// Create a hasher with the given cost parameters.
    ///
    /// # Errors
    /// * `InvalidHashingParams` - Parameters are outside Argon2's accepted ranges
    pub fn new(config: &HashingConfig) -> Result<Self, ConfigError> {
        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            None,
        )
        .map_err(|e| ConfigError::InvalidHashingParams(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let placeholder_secret = SaltString::generate(&mut OsRng);
        let placeholder_hash = argon2
            .hash_password(
                placeholder_secret.as_str().as_bytes(),
                &SaltString::generate(&mut OsRng),
            )
            .map_err(|e| ConfigError::InvalidHashingParams(e.to_string()))?
            .to_string();

        Ok(Self {
            argon2,
            placeholder_hash,
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Never fails: a malformed or foreign hash is logged and reported as a
    /// mismatch. Cost parameters are read from the stored hash, so hashes
    /// produced under older settings keep verifying.
    pub fn verify(&self, hash: &str, password: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed_hash) => parsed_hash,
            Err(e) => {
                tracing::warn!(error = %e, "Unknown password hash format");
                return false;
            }
        };

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Password hash could not be verified");
                false
            }
        }
    }

    /// Run a full verification against the placeholder hash.
    ///
    /// Used when the account being logged into does not exist, so the
    /// rejection costs as much as a wrong password. Always returns `false`.
    pub fn verify_placeholder(&self, password: &str) -> bool {
        self.verify(&self.placeholder_hash, password);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(&HashingConfig::new(1, 1024, 1)).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let password = "Secret123!";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(&hash, password));
        assert!(!hasher.verify(&hash, "wrong"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = hasher();

        let first = hasher.hash("Secret123!").unwrap();
        let second = hasher.hash("Secret123!").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify(&first, "Secret123!"));
        assert!(hasher.verify(&second, "Secret123!"));
    }

    #[test]
    fn test_hash_uses_configured_params() {
        let hash = hasher().hash("Secret123!").unwrap();

        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(hash.contains("m=1024,t=1,p=1"));
    }

    #[test]
    fn test_verify_across_param_changes() {
        let old = hasher().hash("Secret123!").unwrap();
        let current = PasswordHasher::new(&HashingConfig::new(2, 2048, 2)).unwrap();

        assert!(current.verify(&old, "Secret123!"));
    }

    #[test]
    fn test_verify_foreign_hash_is_false() {
        let hasher = hasher();

        assert!(!hasher.verify("not-a-real-hash", "anything"));
        assert!(!hasher.verify("", "anything"));
        assert!(!hasher.verify(
            "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW",
            "anything"
        ));
    }

    #[test]
    fn test_placeholder_matches_configured_cost() {
        let hasher = hasher();

        assert!(hasher.placeholder_hash.contains("m=1024,t=1,p=1"));
        assert!(!hasher.verify_placeholder("Secret123!"));
        assert!(!hasher.verify_placeholder(""));
    }

    #[test]
    fn test_rejects_invalid_params() {
        let result = PasswordHasher::new(&HashingConfig::new(0, 1024, 1));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidHashingParams(_))
        ));
    }
}
