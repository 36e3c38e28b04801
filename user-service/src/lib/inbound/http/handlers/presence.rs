use auth::Identity;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

/// Report the caller's last activity and online status.
pub async fn presence<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<PresenceResponseData>, ApiError> {
    let presence = state
        .activity
        .presence(&identity.id, Utc::now())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to read activity");
            ApiError::InternalServerError("Internal server error".to_string())
        })?
        // The middleware recorded this request, so absence means the store lost it
        .ok_or_else(|| ApiError::NotFound("No activity recorded".to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        PresenceResponseData {
            user_id: identity.id,
            last_activity: presence.last_activity,
            online: presence.online,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceResponseData {
    pub user_id: String,
    pub last_activity: DateTime<Utc>,
    pub online: bool,
}
