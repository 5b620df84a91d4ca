use std::path::PathBuf;

use http::HeaderMap;

use super::challenge::Authentication;
use super::challenge::Challenge;
use super::errors::GateError;
use super::extract::extract_credentials;
use super::state::AuthState;
use super::Authenticator;
use crate::credentials::CredentialStore;
use crate::credentials::ReloadError;
use crate::logout::LogoutRegistry;
use crate::password::PasswordHasher;
use crate::reload::FileReloader;
use crate::source::CredentialSource;
use crate::source::StaticCredentials;

/// HTTP Basic authentication over a pluggable credential source.
pub struct BasicAuth<S> {
    challenge: Challenge,
    source: S,
    logouts: LogoutRegistry,
}

impl<S: CredentialSource> BasicAuth<S> {
    /// # Errors
    /// * `InvalidRealm` - The realm cannot be rendered into a challenge header
    pub fn new(realm: impl Into<String>, source: S) -> Result<Self, GateError> {
        Ok(Self {
            challenge: Challenge::new(realm)?,
            source,
            logouts: LogoutRegistry::new(),
        })
    }

    pub fn realm(&self) -> &str {
        self.challenge.realm()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn logouts(&self) -> &LogoutRegistry {
        &self.logouts
    }

    fn deny(&self, refresh_error: Option<ReloadError>) -> Authentication {
        tracing::debug!(realm = %self.challenge.realm(), "Basic auth challenge issued");
        Authentication::denied(self.challenge.clone(), refresh_error)
    }
}

impl BasicAuth<StaticCredentials> {
    pub fn with_credentials(
        realm: impl Into<String>,
        store: CredentialStore,
    ) -> Result<Self, GateError> {
        Self::new(realm, StaticCredentials::new(store))
    }

    /// Build from plaintext usernames and passwords in alternating order.
    ///
    /// # Errors
    /// * `Credentials` - The list is unpaired or contains an unusable username
    /// * `InvalidRealm` - The realm cannot be rendered into a challenge header
    pub fn from_alternating<T: AsRef<str>>(
        realm: impl Into<String>,
        hasher: &PasswordHasher,
        usernames_and_passwords: &[T],
    ) -> Result<Self, GateError> {
        let store = CredentialStore::from_alternating(hasher, usernames_and_passwords)?;
        Self::with_credentials(realm, store)
    }
}

impl BasicAuth<FileReloader> {
    /// Build from a credential file that is reloaded whenever it changes.
    ///
    /// # Errors
    /// * `Reload` - The initial load of the file failed
    /// * `InvalidRealm` - The realm cannot be rendered into a challenge header
    pub fn from_htpasswd(
        realm: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Result<Self, GateError> {
        let reloader = FileReloader::open(path)?;
        tracing::info!(
            path = %reloader.path().display(),
            records = reloader.snapshot().len(),
            "Credential file loaded"
        );
        Self::new(realm, reloader)
    }
}

impl<S: CredentialSource> Authenticator for BasicAuth<S> {
    fn authenticate(&self, headers: &HeaderMap, state: &mut AuthState) -> Authentication {
        let credentials = extract_credentials(headers).filter(|c| !c.username.is_empty());

        let (snapshot, refresh_error) = match self.source.ensure_fresh() {
            Ok(snapshot) => (snapshot, None),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Credential refresh failed, using last loaded credentials"
                );
                (self.source.snapshot(), Some(e))
            }
        };

        if let Some(credentials) = credentials {
            // A failed refresh may cause the caller to discard this outcome,
            // so the one-shot mark is only spent on a clean attempt.
            let pending = if refresh_error.is_some() {
                self.logouts.is_pending(&credentials.username)
            } else {
                self.logouts.consume_if_pending(&credentials.username)
            };

            if pending {
                tracing::info!(
                    username = %credentials.username,
                    "Re-challenging user after logout"
                );
                state.clear();
                return self.deny(refresh_error);
            }

            if snapshot.verify(&credentials.username, &credentials.password) {
                state.set(credentials.username);
                return Authentication::granted(refresh_error);
            }
        }

        state.clear();
        self.deny(refresh_error)
    }

    fn logout(&self, state: &mut AuthState) {
        if let Some(username) = state.take() {
            self.logouts.mark_logged_out(&username);
            tracing::info!(username = %username, "Logged out user");
        }
    }
}
