use http::header::WWW_AUTHENTICATE;
use http::HeaderValue;
use http::Response;
use http::StatusCode;

use super::errors::GateError;
use crate::credentials::ReloadError;

/// A `401` response asking the client for Basic credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    realm: String,
    header: HeaderValue,
}

impl Challenge {
    /// # Errors
    /// * `InvalidRealm` - The realm contains characters not allowed in a header
    pub fn new(realm: impl Into<String>) -> Result<Self, GateError> {
        let realm = realm.into();
        let escaped = realm.replace('\\', "\\\\").replace('"', "\\\"");
        let header = HeaderValue::from_str(&format!("Basic realm=\"{}\"", escaped))
            .map_err(|_| GateError::InvalidRealm(realm.clone()))?;

        Ok(Self { realm, header })
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.header
    }

    /// Turn a response into the challenge: status `401` plus `WWW-Authenticate`.
    pub fn apply<B>(&self, response: &mut Response<B>) {
        *response.status_mut() = self.status();
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, self.header.clone());
    }
}

/// Outcome of one authentication attempt.
#[derive(Debug)]
#[must_use]
pub struct Authentication {
    challenge: Option<Challenge>,
    refresh_error: Option<ReloadError>,
}

impl Authentication {
    pub(crate) fn granted(refresh_error: Option<ReloadError>) -> Self {
        Self {
            challenge: None,
            refresh_error,
        }
    }

    pub(crate) fn denied(challenge: Challenge, refresh_error: Option<ReloadError>) -> Self {
        Self {
            challenge: Some(challenge),
            refresh_error,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.challenge.is_none()
    }

    /// The challenge to send back when the attempt was denied.
    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    /// Set when the credential source could not be refreshed and the attempt
    /// was decided against the last snapshot that loaded successfully.
    pub fn refresh_error(&self) -> Option<&ReloadError> {
        self.refresh_error.as_ref()
    }

    /// Strict view of the outcome: any refresh failure becomes the error.
    ///
    /// # Errors
    /// * `ReloadError` - The credential source could not be refreshed
    pub fn into_result(self) -> Result<bool, ReloadError> {
        match self.refresh_error {
            Some(error) => Err(error),
            None => Ok(self.challenge.is_none()),
        }
    }
}
