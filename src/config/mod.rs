//! Application configuration.
//!
//! Values come from environment variables (and a `.env` file when present)
//! with the `LEARNING_TRACKER` prefix; `__` separates nested keys.
//!
//! - `LEARNING_TRACKER__SERVER__PORT=8080` -> `server.port`
//! - `LEARNING_TRACKER__DATABASE__URL=postgres://...` -> `database.url`
//! - `LEARNING_TRACKER__EVENTS__LOG_PUBLISHED=false` -> `events.log_published`
//!
//! Without a `database` section the service runs on in-memory repositories.

mod database;
mod error;
mod events;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use events::EventsConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "LEARNING_TRACKER";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub events: EventsConfig,
}

impl AppConfig {
    /// Loads `.env` (if any) and then the prefixed environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` when a value cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_environment()
    }

    fn from_environment() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const KEYS: &[&str] = &[
        "LEARNING_TRACKER__SERVER__PORT",
        "LEARNING_TRACKER__SERVER__ENVIRONMENT",
        "LEARNING_TRACKER__DATABASE__URL",
        "LEARNING_TRACKER__DATABASE__MAX_CONNECTIONS",
        "LEARNING_TRACKER__EVENTS__LOG_PUBLISHED",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn empty_environment_yields_in_memory_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = AppConfig::from_environment().unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.database.is_none());
        assert!(config.events.log_published);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_values_are_read_from_prefixed_variables() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("LEARNING_TRACKER__SERVER__PORT", "9090");
        env::set_var("LEARNING_TRACKER__SERVER__ENVIRONMENT", "production");
        env::set_var("LEARNING_TRACKER__DATABASE__URL", "postgres://localhost/tracker");
        env::set_var("LEARNING_TRACKER__EVENTS__LOG_PUBLISHED", "false");

        let result = AppConfig::from_environment();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 9090);
        assert!(config.is_production());
        assert_eq!(
            config.database.as_ref().map(|db| db.url.as_str()),
            Some("postgres://localhost/tracker")
        );
        assert!(!config.events.log_published);
    }

    #[test]
    fn validate_checks_database_section() {
        let config = AppConfig {
            database: Some(DatabaseConfig {
                url: "postgres://localhost/tracker".to_string(),
                max_connections: 500,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::PoolSizeTooLarge));
    }

    #[test]
    fn unparseable_port_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("LEARNING_TRACKER__SERVER__PORT", "eighty");

        let result = AppConfig::from_environment();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
