pub mod errors;
pub mod htpasswd;
pub mod store;

pub use errors::CredentialError;
pub use errors::LineError;
pub use errors::LineErrorKind;
pub use errors::ReloadError;
pub use store::CredentialStore;
