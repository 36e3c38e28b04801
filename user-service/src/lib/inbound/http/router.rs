use std::sync::Arc;
use std::time::Duration;

use auth::IdentityResolver;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::current_user::current_user;
use super::handlers::presence::presence;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::ActivityTracker;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::UserService;

pub struct AppState<UR: UserRepository> {
    pub user_service: Arc<UserService<UR>>,
    pub resolver: Arc<IdentityResolver<UserService<UR>>>,
    pub activity: Arc<dyn ActivityTracker>,
}

impl<UR: UserRepository> Clone for AppState<UR> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            resolver: Arc::clone(&self.resolver),
            activity: Arc::clone(&self.activity),
        }
    }
}

/// Build the HTTP router.
///
/// The user service doubles as the resolver's lookup, so every protected
/// request reads the account fresh from the repository and is recorded in
/// `activity`.
pub fn create_router<UR: UserRepository>(
    user_service: Arc<UserService<UR>>,
    resolver: Arc<IdentityResolver<UserService<UR>>>,
    activity: Arc<dyn ActivityTracker>,
) -> Router {
    let state = AppState {
        user_service,
        resolver,
        activity,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth", post(authenticate::<UR>))
        .route("/api/v1/register", post(register::<UR>));

    let protected_routes = Router::new()
        .route("/api/v1/users/me", get(current_user))
        .route("/api/v1/users/me/presence", get(presence::<UR>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<UR>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
