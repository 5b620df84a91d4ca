/// Per-request authentication result read by downstream authorization.
///
/// Starts out unauthenticated; the gate sets it on success and clears it on
/// failure or logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<String>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub(crate) fn set(&mut self, username: String) {
        self.user = Some(username);
    }

    pub(crate) fn clear(&mut self) {
        self.user = None;
    }

    pub(crate) fn take(&mut self) -> Option<String> {
        self.user.take()
    }
}
