pub mod basic;
pub mod challenge;
pub mod errors;
pub mod extract;
pub mod state;

use http::HeaderMap;

pub use basic::BasicAuth;
pub use challenge::Authentication;
pub use challenge::Challenge;
pub use errors::GateError;
pub use extract::extract_credentials;
pub use extract::Credentials;
pub use state::AuthState;

/// Capability shared by every authenticator the gate can be built from.
pub trait Authenticator: Send + Sync {
    /// Run one authentication attempt for an inbound request.
    ///
    /// Access denial is not an error: it is reported through
    /// [`Authentication::is_authenticated`] together with a [`Challenge`].
    fn authenticate(&self, headers: &HeaderMap, state: &mut AuthState) -> Authentication;

    /// Force the currently authenticated user through one more challenge.
    fn logout(&self, state: &mut AuthState);
}
