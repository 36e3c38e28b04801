use crate::errors::WeakPassword;

/// Password acceptance rules.
///
/// Every rule is checked independently so that a rejected password reports
/// all of its problems at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    const MIN_LENGTH: usize = 8;
    const MIN_USERNAME_LENGTH: usize = 4;
    const SPECIAL_CHARACTERS: &'static str = "!@#$%^&*(),.?\":{}|<>";
    const COMMON_SEQUENCES: [&'static str; 6] =
        ["12345", "qwerty", "password", "admin", "123456789", "abc123"];

    pub fn new() -> Self {
        Self
    }

    /// Check a password against every strength rule.
    ///
    /// # Arguments
    /// * `password` - Candidate plaintext password
    /// * `username` - Owner's username; only names longer than 3 characters
    ///   are checked for containment
    ///
    /// # Returns
    /// The password unchanged when it passes every rule
    ///
    /// # Errors
    /// * `WeakPassword` - One or more rules failed; `reasons` lists each one
    pub fn validate_strength<'a>(
        &self,
        password: &'a str,
        username: Option<&str>,
    ) -> Result<&'a str, WeakPassword> {
        let mut reasons = Vec::new();

        if password.chars().count() < Self::MIN_LENGTH {
            reasons.push(format!(
                "Password must be at least {} characters long",
                Self::MIN_LENGTH
            ));
        }

        if !password.chars().any(char::is_uppercase) {
            reasons.push("Password must contain at least one uppercase letter".to_string());
        }

        if !password.chars().any(char::is_lowercase) {
            reasons.push("Password must contain at least one lowercase letter".to_string());
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            reasons.push("Password must contain at least one digit".to_string());
        }

        if !password
            .chars()
            .any(|c| Self::SPECIAL_CHARACTERS.contains(c))
        {
            reasons.push("Password must contain at least one special character".to_string());
        }

        let lowered = password.to_lowercase();

        if Self::COMMON_SEQUENCES
            .iter()
            .any(|sequence| lowered.contains(sequence))
        {
            reasons.push("Password must not contain common sequences".to_string());
        }

        if let Some(username) =
            username.filter(|name| name.chars().count() >= Self::MIN_USERNAME_LENGTH)
        {
            if lowered.contains(&username.to_lowercase()) {
                reasons.push("Password must not contain the username".to_string());
            }
        }

        if reasons.is_empty() {
            Ok(password)
        } else {
            Err(WeakPassword { reasons })
        }
    }
}
