//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Rate limit must allow at least one request per window")]
    InvalidRequestLimit,

    #[error("Rate limit window must be between 1 second and 1 day")]
    InvalidWindow,

    #[error("Reaper interval must be between 1 second and 1 day")]
    InvalidReaperInterval,

    #[error("Upcoming horizon must be between 0 and 365 days")]
    InvalidHorizon,
}
