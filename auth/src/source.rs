use std::sync::Arc;

use crate::credentials::CredentialStore;
use crate::credentials::ReloadError;

/// Where the gate gets the credential snapshot to verify against.
pub trait CredentialSource: Send + Sync {
    /// Bring the snapshot up to date with its origin and return it.
    ///
    /// # Errors
    /// * `ReloadError` - The origin could not be checked or read; the
    ///   previously served snapshot is still available from [`snapshot`].
    ///
    /// [`snapshot`]: CredentialSource::snapshot
    fn ensure_fresh(&self) -> Result<Arc<CredentialStore>, ReloadError>;

    /// The snapshot currently being served, without touching the origin.
    fn snapshot(&self) -> Arc<CredentialStore>;
}

/// A fixed set of credentials supplied at construction.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    store: Arc<CredentialStore>,
}

impl StaticCredentials {
    pub fn new(store: CredentialStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn ensure_fresh(&self) -> Result<Arc<CredentialStore>, ReloadError> {
        Ok(self.snapshot())
    }

    fn snapshot(&self) -> Arc<CredentialStore> {
        Arc::clone(&self.store)
    }
}
