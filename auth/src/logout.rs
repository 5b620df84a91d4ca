use std::collections::HashSet;

use parking_lot::Mutex;

/// Usernames that must be challenged once more before they are accepted again.
///
/// A pending mark is consumed by the first authentication attempt that
/// observes it; it is a one-shot signal, not a ban.
#[derive(Debug, Default)]
pub struct LogoutRegistry {
    pending: Mutex<HashSet<String>>,
}

impl LogoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user for a forced challenge. Idempotent; empty usernames are ignored.
    pub fn mark_logged_out(&self, username: &str) {
        if username.is_empty() {
            return;
        }
        self.pending.lock().insert(username.to_string());
    }

    /// Clear a pending mark, returning whether one was present.
    ///
    /// Concurrent callers for the same mark race on a single removal, so at
    /// most one of them sees `true`.
    pub fn consume_if_pending(&self, username: &str) -> bool {
        self.pending.lock().remove(username)
    }

    pub fn is_pending(&self, username: &str) -> bool {
        self.pending.lock().contains(username)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}
