use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::AdminConfig;
use user_service::config::Config;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::activity::InMemoryActivityTracker;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_algorithm = %config.auth.token.algorithm,
        token_ttl_seconds = config.auth.token.ttl_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(&config.auth)?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let user_service = Arc::new(UserService::new(user_repository, Arc::clone(&authenticator)));
    let resolver = Arc::new(authenticator.resolver(Arc::clone(&user_service)));

    bootstrap_admin(&user_service, &config.admin).await?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let activity = Arc::new(InMemoryActivityTracker::new(
        config.activity.online_window_seconds,
    ));

    axum::serve(
        http_listener,
        create_router(user_service, resolver, activity),
    )
    .await?;

    Ok(())
}

async fn bootstrap_admin<UR: UserRepository>(
    user_service: &UserService<UR>,
    admin: &AdminConfig,
) -> Result<(), anyhow::Error> {
    let Some(email) = admin.email.as_deref() else {
        tracing::debug!("Administrator bootstrap skipped");
        return Ok(());
    };

    let password = admin
        .password
        .as_deref()
        .context("admin.password must be set when admin.email is configured")?;

    let username = admin
        .username
        .clone()
        .or_else(|| email.split('@').next().map(str::to_string))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "admin".to_string());

    let admin = user_service.ensure_admin(email, &username, password).await?;
    tracing::info!(user_id = %admin.id, "Administrator ready");

    Ok(())
}
