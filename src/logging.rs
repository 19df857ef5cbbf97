//! Tracing subscriber setup for the binary.

use thiserror::Error;
use tracing_subscriber::{
    filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    EnvFilter, Layer,
};

use crate::config::{LogFormat, ServerConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to parse log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to initialize tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Installs the global subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `server.log_level`. The
/// output format comes from [`ServerConfig::log_format`].
pub fn init_tracing(server: &ServerConfig) -> Result<(), LoggingError> {
    let env_filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(filter) if !filter.trim().is_empty() => build_env_filter(&filter)?,
        _ => build_env_filter(&server.log_level)?,
    };

    let log_format = server.log_format();
    let fmt_layer = match log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_ansi(false)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(fmt_layer).try_init()?;

    tracing::info!(
        target: "logging",
        filter = %server.log_level,
        format = ?log_format,
        "logging_initialized"
    );
    Ok(())
}

fn build_env_filter(filter: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(filter).map_err(|source| LoggingError::InvalidFilter {
        filter: filter.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(build_env_filter(&ServerConfig::default().log_level).is_ok());
    }

    #[test]
    fn malformed_filter_is_rejected() {
        let err = build_env_filter("coaching_core=notalevel").unwrap_err();
        assert!(matches!(err, LoggingError::InvalidFilter { .. }));
    }
}
