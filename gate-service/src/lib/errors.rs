use basic_auth::GateError;
use basic_auth::PasswordError;
use thiserror::Error;

/// Error for building the authenticator from configuration.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("No credential source configured: set auth.htpasswd_file or auth.users")]
    NoCredentialSource,

    #[error("Both auth.htpasswd_file and auth.users are set; choose one")]
    AmbiguousCredentialSource,

    #[error("Invalid hashing configuration: {0}")]
    Hashing(#[from] PasswordError),

    #[error("Failed to build authenticator: {0}")]
    Gate(#[from] GateError),
}
