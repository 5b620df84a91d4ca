use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::AUTHORIZATION;
use http::HeaderMap;

/// Username and password taken from a Basic `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Read Basic credentials from request headers.
///
/// Returns `None` for a missing header, a scheme other than `Basic`, a payload
/// that is not standard base64 or UTF-8, or a decoded payload that does not
/// split into exactly two `:`-separated fields.
pub fn extract_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let mut fields = header.split_whitespace();
    let (scheme, payload) = (fields.next()?, fields.next()?);
    if scheme != "Basic" || fields.next().is_some() {
        return None;
    }

    let decoded = STANDARD.decode(payload).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    let mut parts = decoded.split(':');
    let (username, password) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
