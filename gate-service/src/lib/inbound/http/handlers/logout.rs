use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use basic_auth::AuthState;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Mark the caller for one forced re-authentication.
///
/// The next request carrying the same credentials is challenged; browsers
/// respond by prompting for credentials again.
pub async fn logout(
    State(state): State<AppState>,
    Extension(mut auth): Extension<AuthState>,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    let username = auth
        .user()
        .map(str::to_string)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    state.authenticator.logout(&mut auth);

    Ok(ApiSuccess::new(StatusCode::OK, LogoutResponseData { username }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub username: String,
}
