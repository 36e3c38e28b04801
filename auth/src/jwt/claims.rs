use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::resolver::UserRecord;

/// Claim set signed into every access token.
///
/// `expires_at` is managed by the codec itself rather than the registered
/// `exp` claim. The pass-through fields (`user_id`, `is_verified`, `role`)
/// are informational and are never trusted for authorization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CredentialClaims {
    /// Subject (stable principal identifier, e.g. email)
    #[serde(default)]
    pub sub: String,

    /// Expiry (Unix timestamp), stamped at issuance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,

    /// Issued at (Unix timestamp), stamped at issuance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl CredentialClaims {
    /// Create claims for a subject with nothing else set.
    pub fn new(subject: impl ToString) -> Self {
        Self {
            sub: subject.to_string(),
            ..Self::default()
        }
    }

    /// Create the login payload for a user.
    ///
    /// The subject is the user's email; expiry is left to the codec.
    pub fn for_user(user: &UserRecord) -> Self {
        Self::new(&user.email)
            .with_user_id(&user.id)
            .with_verified(user.is_verified)
            .with_role(&user.role)
    }

    pub fn with_user_id(mut self, user_id: impl ToString) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn with_verified(mut self, is_verified: bool) -> Self {
        self.is_verified = Some(is_verified);
        self
    }

    pub fn with_role(mut self, role: impl ToString) -> Self {
        self.role = Some(role.to_string());
        self
    }

    /// Set expiry (Unix timestamp).
    pub fn with_expires_at(mut self, expires_at: i64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Check if the claim set is expired at `current_timestamp`.
    ///
    /// A claim set expiring exactly at `current_timestamp` is still valid.
    /// Returns `None` when no expiry is present.
    pub fn is_expired(&self, current_timestamp: i64) -> Option<bool> {
        self.expires_at
            .map(|expires_at| current_timestamp > expires_at)
    }
}
