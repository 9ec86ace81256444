//! Application configuration
//!
//! Configuration is layered: built-in defaults, then an optional
//! `config/storefront.toml` file, then `STOREFRONT_*` environment variables
//! (`STOREFRONT_DATABASE__PATH=...` overrides `database.path`). A `.env` file
//! in the working directory is loaded before the environment is read.

use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: String,
    pub max_connections: u32,
    pub busy_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.max_request_body_size", 1024 * 1024)?
            .set_default("database.path", "storefront.db")?
            .set_default("database.max_connections", 5)?
            .set_default("database.busy_timeout_seconds", 30)?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.token_ttl_seconds", 24 * 60 * 60)?
            .set_default("logging.level", "storefront=info")?
            .set_default("logging.json", false)?
            .add_source(config::File::with_name("config/storefront").required(false))
            .add_source(
                config::Environment::with_prefix("STOREFRONT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.auth.jwt_secret.is_empty() {
            return Err("auth.jwt_secret must be set".to_string());
        }
        if self.auth.token_ttl_seconds <= 0 {
            return Err("auth.token_ttl_seconds must be positive".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("database.max_connections must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
