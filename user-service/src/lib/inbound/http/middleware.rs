use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use super::handlers::ApiError;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the bearer token into an `auth::Identity`,
/// records the account's activity and stores the identity in request
/// extensions.
pub async fn authenticate<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = auth::extract_bearer(authorization).to_string();

    let identity = state
        .resolver
        .verify_and_resolve(&token)
        .await
        .map_err(|e| {
            tracing::warn!(reason = e.kind(), "Request rejected by authentication");
            ApiError::from(e)
        })?;

    if let Err(e) = state
        .activity
        .record_activity(&identity.id, Utc::now())
        .await
    {
        // Activity is best effort and never blocks the request
        tracing::error!(user_id = %identity.id, error = %e, "Failed to record activity");
    }

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
