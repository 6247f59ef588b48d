//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::domain::credentials::{DEFAULT_PASSWORD_COST, MAX_PASSWORD_COST, MIN_PASSWORD_COST};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, test, production)
    pub environment: String,

    /// Lifetime of a login token
    pub token_ttl: Duration,

    /// How often expired sessions are purged. Never zero.
    pub session_cleanup_interval: Duration,

    /// bcrypt work factor for new password hashes
    pub password_cost: u32,

    /// Emit JSON logs instead of human-readable ones
    pub json_logs: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 10)?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = parse_var("PORT", 3003)?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let token_ttl = Duration::from_secs(parse_var("TOKEN_TTL_SECONDS", 3600)?);

        let session_cleanup_interval = parse_interval("SESSION_CLEANUP_INTERVAL_SECONDS", 300)?;

        let password_cost = parse_var("BCRYPT_COST", DEFAULT_PASSWORD_COST)?;
        if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&password_cost) {
            return Err(ConfigError::InvalidValue("BCRYPT_COST"));
        }

        let json_logs = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => true,
            Ok("pretty") | Err(_) => false,
            Ok(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT")),
        };

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            token_ttl,
            session_cleanup_interval,
            password_cost,
            json_logs,
        })
    }

    /// Check if running the test environment (enables the reset endpoint)
    pub fn is_test(&self) -> bool {
        self.environment == "test"
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue(name)),
        Err(_) => Ok(default),
    }
}

/// Positive number of seconds; zero is rejected
fn parse_interval(name: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    match parse_var(name, default_secs)? {
        0 => Err(ConfigError::InvalidValue(name)),
        secs => Ok(Duration::from_secs(secs)),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
