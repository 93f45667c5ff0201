//! services/api/src/error.rs
//!
//! Errors that stop the API service from starting or serving.
//! Request-level failures are mapped to status codes in the handlers instead.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Connecting to the ad-code database failed.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// `CORS_ORIGIN` is not a valid header value.
    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),

    /// Binding the listener or serving failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
