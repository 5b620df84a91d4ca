use thiserror::Error;

use crate::credentials::CredentialError;
use crate::credentials::ReloadError;

/// Error for constructing an authentication gate.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Realm cannot be used in a header value: {0:?}")]
    InvalidRealm(String),

    #[error("Invalid credentials: {0}")]
    Credentials(#[from] CredentialError),

    #[error("Credential file error: {0}")]
    Reload(#[from] ReloadError),
}
