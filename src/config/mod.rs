//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `SLURP` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use slurp::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod auth;
mod client;
mod database;
mod error;
mod server;

pub use auth::AuthConfig;
pub use client::ClientConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Profile storage (PostgreSQL or in-memory)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session token validation
    #[serde(default)]
    pub auth: AuthConfig,

    /// HTTP profile gateway used by clients; not read by the server
    #[serde(default)]
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SLURP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SLURP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SLURP__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("SLURP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate the sections the server uses
    ///
    /// The `client` section is checked by `HttpProfileGateway::from_config`
    /// where it is consumed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SLURP__DATABASE__URL",
        "SLURP__DATABASE__BACKEND",
        "SLURP__SERVER__PORT",
        "SLURP__SERVER__ENVIRONMENT",
        "SLURP__AUTH__JWT_SECRET",
        "SLURP__CLIENT__API_BASE_URL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SLURP__DATABASE__URL", "postgresql://test@localhost/test");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_backend_loads_without_database_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SLURP__DATABASE__BACKEND", "memory");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
        assert!(!config.auth.is_enabled());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SLURP__SERVER__PORT", "3000");
        env::set_var("SLURP__SERVER__ENVIRONMENT", "production");
        env::set_var("SLURP__AUTH__JWT_SECRET", "shh");
        env::set_var("SLURP__CLIENT__API_BASE_URL", "https://api.slurp.example");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert!(config.auth.is_enabled());
        assert_eq!(config.client.api_base_url, "https://api.slurp.example");
    }

    #[test]
    fn test_server_validation_ignores_client_section() {
        let config = AppConfig {
            database: DatabaseConfig {
                backend: StorageBackend::Memory,
                ..Default::default()
            },
            client: ClientConfig {
                api_base_url: "not a url".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.client.validate().is_err());
    }

    #[test]
    fn test_validation_reports_missing_database_url() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
    }
}
