//! Credential snapshot backed by a file that may change while serving.
//!
//! The served snapshot sits behind an `ArcSwap`, so readers never block on a
//! reload. Stat, read and parse all happen before the publish lock is taken;
//! the lock only guards the watermark comparison and the pointer swap.

use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::credentials::htpasswd;
use crate::credentials::CredentialStore;
use crate::credentials::ReloadError;
use crate::source::CredentialSource;

/// Reloads a credential file whenever its modification time advances.
pub struct FileReloader {
    path: PathBuf,
    snapshot: ArcSwap<CredentialStore>,
    /// Modification time of the file the served snapshot was built from.
    watermark: Mutex<SystemTime>,
    loads: AtomicU64,
}

impl FileReloader {
    /// Load the credential file for the first time.
    ///
    /// # Errors
    /// * `Stat` - The file does not exist or its metadata is unavailable
    /// * `Read` - The file could not be opened or read
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ReloadError> {
        let path = path.into();
        let modified = modified_time(&path)?;
        let store = load(&path)?;

        Ok(Self {
            path,
            snapshot: ArcSwap::from_pointee(store),
            watermark: Mutex::new(modified),
            loads: AtomicU64::new(1),
        })
    }

    /// Reload the file if it changed since the last successful load.
    ///
    /// On error the served snapshot and the watermark are left as they were,
    /// so the next call retries.
    pub fn ensure_fresh(&self) -> Result<Arc<CredentialStore>, ReloadError> {
        let modified = modified_time(&self.path)?;
        if modified <= *self.watermark.lock() {
            return Ok(self.snapshot());
        }

        let candidate = load(&self.path)?;

        let mut watermark = self.watermark.lock();
        // A concurrent reload may have published a newer file meanwhile.
        if modified > *watermark {
            let records = candidate.len();
            self.snapshot.store(Arc::new(candidate));
            *watermark = modified;
            self.loads.fetch_add(1, Ordering::Relaxed);
            tracing::info!(
                path = %self.path.display(),
                records,
                "Credential file reloaded"
            );
        }
        drop(watermark);

        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> Arc<CredentialStore> {
        self.snapshot.load_full()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn watermark(&self) -> SystemTime {
        *self.watermark.lock()
    }

    /// Number of times the file has been read and published, including the
    /// initial load.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }
}

impl CredentialSource for FileReloader {
    fn ensure_fresh(&self) -> Result<Arc<CredentialStore>, ReloadError> {
        FileReloader::ensure_fresh(self)
    }

    fn snapshot(&self) -> Arc<CredentialStore> {
        FileReloader::snapshot(self)
    }
}

impl std::fmt::Debug for FileReloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileReloader")
            .field("path", &self.path)
            .field("watermark", &self.watermark())
            .field("loads", &self.load_count())
            .finish()
    }
}

fn modified_time(path: &Path) -> Result<SystemTime, ReloadError> {
    std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|source| ReloadError::Stat {
            path: path.to_path_buf(),
            source,
        })
}

fn load(path: &Path) -> Result<CredentialStore, ReloadError> {
    let contents = std::fs::read(path).map_err(|source| ReloadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = htpasswd::parse(&contents);
    for rejected in &parsed.rejected {
        tracing::warn!(
            path = %path.display(),
            line = rejected.line,
            reason = %rejected.kind,
            "Skipping malformed credential record"
        );
    }

    tracing::debug!(
        path = %path.display(),
        records = parsed.store.len(),
        skipped = parsed.rejected.len(),
        "Credential file parsed"
    );

    Ok(parsed.store)
}
