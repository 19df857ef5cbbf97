//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COACHING_CORE` prefix and nested values use `__` as separator.
//!
//! Every section has defaults, so an empty environment yields a runnable
//! configuration.
//!
//! # Example
//!
//! ```no_run
//! use coaching_core::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod reminders;
mod server;
mod throttle;

pub use error::{ConfigError, ValidationError};
pub use reminders::RemindersConfig;
pub use server::{Environment, LogFormat, ServerConfig};
pub use throttle::ThrottleConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Rate limit, demo quota and reaper settings
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Reminder classification settings
    #[serde(default)]
    pub reminders: RemindersConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COACHING_CORE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COACHING_CORE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `COACHING_CORE__THROTTLE__REAPER_INTERVAL_SECS=300` -> `throttle.reaper_interval_secs = 300`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COACHING_CORE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.throttle.validate()?;
        self.reminders.validate()?;
        Ok(())
    }
}
