use axum::http::StatusCode;
use axum::Extension;
use basic_auth::AuthState;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;

pub async fn whoami(
    Extension(auth): Extension<AuthState>,
) -> Result<ApiSuccess<WhoAmIResponseData>, ApiError> {
    let username = auth
        .user()
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        WhoAmIResponseData {
            username: username.to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhoAmIResponseData {
    pub username: String,
}
