use async_trait::async_trait;

use super::identity::UserRecord;

/// Port for finding the user a token's subject refers to.
#[async_trait]
pub trait UserLookup: Send + Sync + 'static {
    /// Find the user identified by `subject`.
    ///
    /// `subject` comes straight from a token and must be treated as
    /// attacker-controlled.
    ///
    /// # Returns
    /// Optional user record (None if no such user)
    ///
    /// # Errors
    /// Any storage failure; the resolver masks it as an invalid token
    async fn find_by_subject(&self, subject: &str) -> anyhow::Result<Option<UserRecord>>;
}
