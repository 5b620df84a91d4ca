pub mod authenticator;
pub mod config;
pub mod errors;
pub mod inbound;
