use std::fmt;

use argon2::password_hash::PasswordHash;

use super::errors::PasswordError;

/// A stored password digest in PHC string format.
///
/// Only ever constructed from an already-hashed value, so a digest can be
/// held in shared state without carrying the plaintext it was derived from.
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Parse a PHC string, rejecting anything the verifier could not decode.
    ///
    /// # Errors
    /// * `MalformedDigest` - Value is not a PHC string
    pub fn parse(value: &str) -> Result<Self, PasswordError> {
        PasswordHash::new(value).map_err(|e| PasswordError::MalformedDigest(e.to_string()))?;
        Ok(Self(value.to_string()))
    }

    pub(crate) fn from_phc(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
