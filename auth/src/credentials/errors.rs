use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::password::PasswordError;

/// Error for building a credential store from configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Username '{0}' has no matching password")]
    UnpairedUsername(String),

    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Username '{0}' contains ':' and cannot be sent with the Basic scheme")]
    InvalidUsername(String),

    #[error("Password error: {0}")]
    Hashing(#[from] PasswordError),
}

/// Error for loading the backing credential file.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("Failed to stat credential file {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read credential file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReloadError {
    pub fn path(&self) -> &Path {
        match self {
            ReloadError::Stat { path, .. } | ReloadError::Read { path, .. } => path,
        }
    }
}

/// A single htpasswd line that was skipped during parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct LineError {
    pub line: usize,
    pub kind: LineErrorKind,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineErrorKind {
    #[error("not valid UTF-8")]
    InvalidUtf8,

    #[error("missing ':' separator")]
    MissingSeparator,

    #[error("empty username")]
    EmptyUsername,

    #[error("empty password hash")]
    EmptyHash,

    #[error("{0}")]
    MalformedHash(PasswordError),
}
