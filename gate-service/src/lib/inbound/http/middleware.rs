use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use basic_auth::AuthState;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that runs the Basic auth gate and adds the resulting
/// `AuthState` to request extensions.
pub async fn basic_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let mut auth = AuthState::new();
    let outcome = state.authenticator.authenticate(req.headers(), &mut auth);

    if let Some(error) = outcome.refresh_error() {
        if state.strict_reload {
            tracing::error!(error = %error, "Rejecting request, credentials could not be refreshed");
            return Err(ApiError::ServiceUnavailable(
                "Credential store unavailable".to_string(),
            )
            .into_response());
        }
    }

    if let Some(challenge) = outcome.challenge() {
        let mut response =
            ApiError::Unauthorized("Authentication required".to_string()).into_response();
        challenge.apply(&mut response);
        return Err(response);
    }

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
