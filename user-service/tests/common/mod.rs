use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::AuthConfig;
use auth::Authenticator;
use auth::HashingConfig;
use auth::TokenCodec;
use auth::TokenConfig;
use user_service::domain::user::models::Role;
use user_service::domain::user::models::User;
use user_service::domain::user::models::UserId;
use user_service::domain::user::models::Username;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::activity::InMemoryActivityTracker;
use user_service::user::errors::UserError;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub activity: Arc<InMemoryActivityTracker>,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let config = AuthConfig {
            token: TokenConfig::new(TEST_SECRET).with_ttl_seconds(3600),
            hashing: HashingConfig::new(1, 1024, 1),
        };

        let authenticator =
            Arc::new(Authenticator::new(&config).expect("Failed to create authenticator"));
        let repository = Arc::new(InMemoryUserRepository::default());
        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));
        let resolver = Arc::new(authenticator.resolver(Arc::clone(&user_service)));

        let activity = Arc::new(InMemoryActivityTracker::new(300));
        let router = create_router(user_service, resolver, activity.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let token_codec = TokenCodec::new(&config.token).expect("Failed to create token codec");

        Self {
            address,
            repository,
            activity,
            api_client: reqwest::Client::new(),
            token_codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }
}

/// Repository backed by a vector, standing in for Postgres.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn deactivate(&self, email: &str) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.email.as_str() == email) {
            user.is_active = false;
        }
    }

    pub fn remove(&self, email: &str) {
        self.users
            .lock()
            .unwrap()
            .retain(|u| u.email.as_str() != email);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.username == username).cloned())
    }

    async fn update_role(&self, id: &UserId, role: Role) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.role = role;
        Ok(())
    }
}
