//! HTTP Basic authentication library
//!
//! Provides the pieces needed to guard HTTP endpoints with the Basic scheme:
//! - Password hashing (Argon2id, PHC strings)
//! - Immutable credential snapshots built from plaintext pairs or `username:hash` files
//! - One-shot forced re-authentication ("logout") per user
//! - Credential files reloaded on change without restarting the process
//! - An authentication gate that ties these together per request
//!
//! The gate works on `http` types only, so any server framework can call it.
//!
//! # Examples
//!
//! ## Static credentials
//! ```
//! use basic_auth::{AuthState, Authenticator, BasicAuth, PasswordHasher};
//! use http::HeaderMap;
//!
//! let gate = BasicAuth::from_alternating("Restricted", &PasswordHasher::new(), &["alice", "secret"]).unwrap();
//!
//! let mut headers = HeaderMap::new();
//! // base64("alice:secret")
//! headers.insert("authorization", "Basic YWxpY2U6c2VjcmV0".parse().unwrap());
//!
//! let mut state = AuthState::new();
//! let outcome = gate.authenticate(&headers, &mut state);
//! assert!(outcome.is_authenticated());
//! assert_eq!(state.user(), Some("alice"));
//!
//! // Logout forces exactly one more challenge
//! gate.logout(&mut state);
//! assert!(!gate.authenticate(&headers, &mut state).is_authenticated());
//! assert!(gate.authenticate(&headers, &mut state).is_authenticated());
//! ```
//!
//! ## Credential file
//! ```no_run
//! use basic_auth::{AuthState, Authenticator, BasicAuth};
//! use http::{HeaderMap, Response};
//!
//! let gate = BasicAuth::from_htpasswd("Restricted", "/etc/myapp/htpasswd").unwrap();
//!
//! let mut state = AuthState::new();
//! let outcome = gate.authenticate(&HeaderMap::new(), &mut state);
//! if let Some(challenge) = outcome.challenge() {
//!     let mut response = Response::new(());
//!     challenge.apply(&mut response);
//! }
//! ```

pub mod credentials;
pub mod gate;
pub mod logout;
pub mod password;
pub mod reload;
pub mod source;

// Re-export commonly used items
pub use credentials::htpasswd;
pub use credentials::CredentialError;
pub use credentials::CredentialStore;
pub use credentials::ReloadError;
pub use gate::AuthState;
pub use gate::Authentication;
pub use gate::Authenticator;
pub use gate::BasicAuth;
pub use gate::Challenge;
pub use gate::GateError;
pub use logout::LogoutRegistry;
pub use password::PasswordDigest;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use reload::FileReloader;
pub use source::CredentialSource;
pub use source::StaticCredentials;
