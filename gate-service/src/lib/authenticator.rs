use std::sync::Arc;

use basic_auth::Authenticator;
use basic_auth::BasicAuth;
use basic_auth::PasswordHasher;

use crate::config::AuthConfig;
use crate::config::HashingConfig;
use crate::errors::ServiceError;

/// Build the password hasher from configured Argon2id costs.
pub fn build_hasher(config: &HashingConfig) -> Result<PasswordHasher, ServiceError> {
    Ok(PasswordHasher::with_params(
        config.memory_kib,
        config.iterations,
        config.parallelism,
    )?)
}

/// Build the authenticator for the configured credential source.
///
/// # Errors
/// * `NoCredentialSource` - Neither a file nor a user list is configured
/// * `AmbiguousCredentialSource` - Both are configured
/// * `Gate` - The user list is invalid or the initial file load failed
pub fn build_authenticator(
    config: &AuthConfig,
    hasher: &PasswordHasher,
) -> Result<Arc<dyn Authenticator>, ServiceError> {
    match (&config.htpasswd_file, config.users.is_empty()) {
        (Some(_), false) => Err(ServiceError::AmbiguousCredentialSource),
        (None, true) => Err(ServiceError::NoCredentialSource),
        (Some(path), true) => {
            let gate = BasicAuth::from_htpasswd(config.realm.clone(), path.clone())?;
            Ok(Arc::new(gate))
        }
        (None, false) => {
            let gate =
                BasicAuth::from_alternating(config.realm.clone(), hasher, config.users.as_slice())?;
            tracing::info!(
                users = config.users.len() / 2,
                realm = %config.realm,
                "Static credentials loaded"
            );
            Ok(Arc::new(gate))
        }
    }
}
