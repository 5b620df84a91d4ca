use std::env;
use std::path::PathBuf;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for gate-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub hashing: HashingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Credential source and challenge settings.
///
/// Exactly one of `htpasswd_file` and `users` must be set.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub realm: String,
    /// `username:hash` file reloaded whenever it changes.
    pub htpasswd_file: Option<PathBuf>,
    /// Plaintext usernames and passwords in alternating order.
    #[serde(default)]
    pub users: Vec<String>,
    /// Reject requests instead of serving the last loaded credentials when
    /// the credential file cannot be refreshed.
    #[serde(default)]
    pub strict_reload: bool,
}

/// Argon2id cost parameters used when hashing passwords.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

// Same cost as `argon2::Params::default()`.
impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__REALM, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: AUTH__HTPASSWD_FILE=/etc/gate/htpasswd overrides auth.htpasswd_file
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
