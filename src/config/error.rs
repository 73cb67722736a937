//! Failures from loading or checking `AppConfig`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("configuration rejected: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Values that parsed but make no sense together.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("server.port must be non-zero")]
    InvalidPort,

    #[error("'{0}' is not a bindable host")]
    InvalidBindAddress(String),

    #[error("server.request_timeout_secs must be within 1..=300")]
    InvalidTimeout,

    #[error("database.url must start with postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    #[error("database.min_connections is larger than database.max_connections")]
    InvalidPoolSize,

    #[error("database.max_connections may not exceed 100")]
    PoolSizeTooLarge,
}
