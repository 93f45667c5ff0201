//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use revenue_content_core::AiSettings;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Postgres URL for saved ad codes. Without it codes live in memory.
    pub database_url: Option<String>,
    pub log_level: Level,
    /// Without a key, articles come from the built-in fallback draft.
    pub openai_api_key: Option<String>,
    pub ai: AiSettings,
    /// How long `/articles` waits for the AI service to come up.
    pub ai_ready_timeout: Duration,
    /// Bearer token editors must present. `None` disables the check.
    pub editor_token: Option<String>,
    pub cors_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: None,
            log_level: Level::INFO,
            openai_api_key: None,
            ai: AiSettings::default(),
            ai_ready_timeout: Duration::from_secs(10),
            editor_token: None,
            cors_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let defaults = Self::default();

        // --- Load Server and Database Settings ---
        let bind_address = parse_var("BIND_ADDRESS")?.unwrap_or(defaults.bind_address);
        let database_url = non_empty_var("DATABASE_URL");

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load AI Settings ---
        let openai_api_key = non_empty_var("OPENAI_API_KEY");
        let ai = AiSettings {
            model: non_empty_var("AI_MODEL").unwrap_or(defaults.ai.model),
            temperature: parse_var("AI_TEMPERATURE")?.unwrap_or(defaults.ai.temperature),
            max_tokens: parse_var("AI_MAX_TOKENS")?.unwrap_or(defaults.ai.max_tokens),
        };
        let ai_ready_timeout = parse_var::<u64>("AI_READY_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.ai_ready_timeout);

        // --- Load Access Settings ---
        let editor_token = non_empty_var("EDITOR_TOKEN");
        let cors_origin = non_empty_var("CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            openai_api_key,
            ai,
            ai_ready_timeout,
            editor_token,
            cors_origin,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
        None => Ok(None),
    }
}
