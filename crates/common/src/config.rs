//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Authentication configuration.
///
/// Credential verification lives in the upstream OAuth collaborator; this
/// section only names the session cookie and the identity that is granted
/// the admin role on sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// External identity that is promoted to admin on every sync.
    #[serde(default)]
    pub owner_open_id: Option<String>,
    /// Name of the session cookie cleared on logout.
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Shared secret the OAuth callback presents when syncing a user.
    ///
    /// The sync procedure is refused entirely while this is unset.
    #[serde(default)]
    pub sync_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            owner_open_id: None,
            session_cookie: default_session_cookie(),
            sync_secret: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

fn default_session_cookie() -> String {
    "nexus_session".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `NEXUS_ENV`)
    /// 3. Environment variables with `NEXUS_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("NEXUS_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("NEXUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("NEXUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_in() {
        let config: Config = config::Config::builder()
            .set_override("database.url", "postgres://localhost/nexus")
            .unwrap()
            .set_override("server.host", "127.0.0.1")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 100);
        assert_eq!(config.auth.session_cookie, "nexus_session");
        assert!(config.auth.owner_open_id.is_none());
    }
}
