use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::Presence;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::ActivityError;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub expires_in: i64,
}

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user after checking password strength.
    ///
    /// # Errors
    /// * `WeakPassword` - Password fails one or more strength rules
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `identifier` - Email address or username
    /// * `password` - Plaintext password
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `Inactive` - Account is deactivated
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, identifier: &str, password: &str) -> Result<LoginOutcome, UserError>;

    /// Retrieve user by email address or username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>, UserError>;

    /// Make sure an administrator account exists for `email`.
    ///
    /// Creates the account when missing and promotes it otherwise.
    ///
    /// # Errors
    /// * `InvalidEmail` / `InvalidUsername` - Bootstrap settings are malformed
    /// * `DatabaseError` - Database operation failed
    async fn ensure_admin(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Change the role of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_role(&self, id: &UserId, role: Role) -> Result<(), UserError>;
}

/// Store for per-account activity of authenticated requests.
#[async_trait]
pub trait ActivityTracker: Send + Sync + 'static {
    /// Mark `user_id` as active at `at` and set it online.
    ///
    /// # Errors
    /// * `Unavailable` - Activity store cannot be reached
    async fn record_activity(&self, user_id: &str, at: DateTime<Utc>)
        -> Result<(), ActivityError>;

    /// Presence of `user_id` as seen at `now`.
    ///
    /// # Returns
    /// None if the account was never active
    ///
    /// # Errors
    /// * `Unavailable` - Activity store cannot be reached
    async fn presence(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Presence>, ActivityError>;
}
