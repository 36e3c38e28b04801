use auth::Identity;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;

/// Return the identity resolved from the bearer token.
pub async fn current_user(Extension(identity): Extension<Identity>) -> ApiSuccess<Identity> {
    ApiSuccess::new(StatusCode::OK, identity)
}
