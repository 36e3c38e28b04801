use std::env;

use auth::AuthConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub activity: ActivityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Administrator account created at startup.
///
/// Bootstrap is skipped when `email` is not set.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Activity tracking of authenticated requests.
#[derive(Debug, Deserialize, Clone)]
pub struct ActivityConfig {
    /// Seconds after the last request during which an account counts as online
    #[serde(default = "default_online_window_seconds")]
    pub online_window_seconds: i64,
}

fn default_online_window_seconds() -> i64 {
    5 * 60
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            online_window_seconds: default_online_window_seconds(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTH__TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH__TOKEN__SECRET=... overrides auth.token.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
