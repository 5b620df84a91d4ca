use std::collections::HashMap;

use super::errors::CredentialError;
use crate::password::PasswordDigest;
use crate::password::PasswordHasher;

/// Immutable snapshot of username to password digest.
///
/// A store is never mutated after construction; reloading builds a new one
/// and replaces the old snapshot wholesale.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    digests: HashMap<String, PasswordDigest>,
    verifier: PasswordHasher,
}

impl CredentialStore {
    /// Build a store from plaintext pairs, hashing each password immediately.
    ///
    /// # Errors
    /// * `EmptyUsername` - A username is empty
    /// * `InvalidUsername` - A username contains ':'
    /// * `Hashing` - Password hashing failed
    pub fn from_pairs<I, U, P>(hasher: &PasswordHasher, pairs: I) -> Result<Self, CredentialError>
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: AsRef<str>,
    {
        let mut digests = HashMap::new();

        for (username, password) in pairs {
            let username = validate_username(username.into())?;
            let digest = hasher.hash(password.as_ref())?;
            digests.insert(username, digest);
        }

        Ok(Self {
            digests,
            verifier: hasher.clone(),
        })
    }

    /// Build a store from a flat list of usernames and passwords in
    /// alternating order (`user, pass, user, pass, ...`).
    ///
    /// # Errors
    /// * `UnpairedUsername` - The list has an odd number of entries
    /// * any error of [`CredentialStore::from_pairs`]
    pub fn from_alternating<S: AsRef<str>>(
        hasher: &PasswordHasher,
        usernames_and_passwords: &[S],
    ) -> Result<Self, CredentialError> {
        if usernames_and_passwords.len() % 2 != 0 {
            let last = usernames_and_passwords
                .last()
                .map(|s| s.as_ref().to_string())
                .unwrap_or_default();
            return Err(CredentialError::UnpairedUsername(last));
        }

        let pairs = usernames_and_passwords
            .chunks_exact(2)
            .map(|pair| (pair[0].as_ref().to_string(), pair[1].as_ref()));

        Self::from_pairs(hasher, pairs)
    }

    /// Build a store from records that are already hashed.
    pub fn from_digests<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, PasswordDigest)>,
    {
        Self {
            digests: records.into_iter().collect(),
            verifier: PasswordHasher::default(),
        }
    }

    /// Check a plaintext password for a user.
    ///
    /// Unknown users and undecodable digests both yield `false`.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let Some(digest) = self.digests.get(username) else {
            return false;
        };

        match self.verifier.verify(password, digest) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Stored digest is unusable");
                false
            }
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.digests.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// Usernames in sorted order.
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.digests.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn validate_username(username: String) -> Result<String, CredentialError> {
    if username.is_empty() {
        return Err(CredentialError::EmptyUsername);
    }
    if username.contains(':') {
        return Err(CredentialError::InvalidUsername(username));
    }
    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_params(8, 1, 1).expect("Failed to build hasher")
    }

    #[test]
    fn test_from_pairs_and_verify() {
        let store = CredentialStore::from_pairs(
            &cheap_hasher(),
            [("alice", "wonderland"), ("bob", "builder")],
        )
        .expect("Failed to build store");

        assert_eq!(store.len(), 2);
        assert!(store.verify("alice", "wonderland"));
        assert!(store.verify("bob", "builder"));
        assert!(!store.verify("alice", "builder"));
    }

    #[test]
    fn test_unknown_user_is_rejected() {
        let store = CredentialStore::from_pairs(&cheap_hasher(), [("alice", "wonderland")])
            .expect("Failed to build store");

        assert!(!store.verify("mallory", "wonderland"));
        assert!(!store.verify("", ""));
    }

    #[test]
    fn test_from_alternating() {
        let store =
            CredentialStore::from_alternating(&cheap_hasher(), &["alice", "pw1", "bob", "pw2"])
                .expect("Failed to build store");

        assert_eq!(store.usernames(), vec!["alice", "bob"]);
        assert!(store.verify("bob", "pw2"));
    }

    #[test]
    fn test_from_alternating_odd_length() {
        let result = CredentialStore::from_alternating(&cheap_hasher(), &["alice", "pw1", "bob"]);
        assert_eq!(
            result.unwrap_err(),
            CredentialError::UnpairedUsername("bob".to_string())
        );
    }

    #[test]
    fn test_rejects_invalid_usernames() {
        let hasher = cheap_hasher();

        let empty = CredentialStore::from_pairs(&hasher, [("", "pw")]);
        assert_eq!(empty.unwrap_err(), CredentialError::EmptyUsername);

        let colon = CredentialStore::from_pairs(&hasher, [("a:b", "pw")]);
        assert!(matches!(colon, Err(CredentialError::InvalidUsername(_))));
    }

    #[test]
    fn test_debug_never_shows_password() {
        let store = CredentialStore::from_pairs(&cheap_hasher(), [("alice", "s3cr3t-value")])
            .expect("Failed to build store");

        let rendered = format!("{:?}", store);
        assert!(!rendered.contains("s3cr3t-value"));
    }
}
