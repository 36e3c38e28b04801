use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::CredentialClaims;
use auth::UserLookup;
use auth::UserRecord;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserIdentifier;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::LoginOutcome;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password and token handling
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn new_user(
        &self,
        username: Username,
        email: EmailAddress,
        password: &str,
        role: Role,
    ) -> Result<User, UserError> {
        self.authenticator
            .validate_password_strength(password, Some(username.as_str()))?;

        let password_hash = self.authenticator.hash_password(password)?;

        Ok(User {
            id: UserId::new(),
            username,
            email,
            password_hash,
            role,
            is_active: true,
            is_verified: role == Role::Admin,
            created_at: Utc::now(),
        })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let user = self.new_user(
            command.username,
            command.email,
            &command.password,
            Role::User,
        )?;

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, identifier: &str, password: &str) -> Result<LoginOutcome, UserError> {
        let Some(user) = self.get_user_by_identifier(identifier).await? else {
            return Err(self.authenticator.reject_unknown_user(password).into());
        };

        let claims = CredentialClaims::for_user(&UserRecord::from(&user));
        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, claims)?;

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Login attempt on inactive account");
            return Err(UserError::Inactive);
        }

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            access_token: result.access_token,
            expires_in: result.expires_in,
        })
    }

    async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>, UserError> {
        match UserIdentifier::parse(identifier) {
            UserIdentifier::Email(email) => self.repository.find_by_email(&email).await,
            UserIdentifier::Username(username) => match Username::new(username) {
                Ok(username) => self.repository.find_by_username(&username).await,
                // A malformed username cannot belong to any stored user
                Err(_) => Ok(None),
            },
        }
    }

    async fn ensure_admin(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<User, UserError> {
        let email = EmailAddress::new(email.to_string())?;

        if let Some(mut user) = self.repository.find_by_email(email.as_str()).await? {
            if user.role != Role::Admin {
                self.repository.update_role(&user.id, Role::Admin).await?;
                user.role = Role::Admin;
                tracing::info!(user_id = %user.id, "Existing user promoted to administrator");
            } else {
                tracing::info!(user_id = %user.id, "Administrator already exists");
            }
            return Ok(user);
        }

        let username = Username::new(username.to_string())?;
        let admin = self.new_user(username, email, password, Role::Admin)?;
        let created = self.repository.create(admin).await?;
        tracing::info!(user_id = %created.id, "Administrator created");

        Ok(created)
    }
}

#[async_trait]
impl<UR> UserLookup for UserService<UR>
where
    UR: UserRepository,
{
    async fn find_by_subject(&self, subject: &str) -> anyhow::Result<Option<UserRecord>> {
        let user = self.get_user_by_identifier(subject).await?;
        Ok(user.as_ref().map(UserRecord::from))
    }
}
