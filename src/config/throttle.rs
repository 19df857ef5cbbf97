//! Throttle configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::throttle::DEFAULT_DEMO_MESSAGE_LIMIT;

const MAX_SECS: u64 = 86_400;

/// Rate limit, demo quota and reaper settings
#[derive(Debug, Clone, Deserialize)]
pub struct ThrottleConfig {
    /// Requests admitted per identity per window
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,

    /// Fixed window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Demo turns per fingerprint
    #[serde(default = "default_demo_message_limit")]
    pub demo_message_limit: u32,

    /// Seconds between expired-window sweeps
    #[serde(default = "default_reaper_interval_secs")]
    pub reaper_interval_secs: u64,
}

impl ThrottleConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn reaper_interval(&self) -> Duration {
        Duration::from_secs(self.reaper_interval_secs)
    }

    /// Validate throttle configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.requests_per_window == 0 {
            return Err(ValidationError::InvalidRequestLimit);
        }
        if self.window_secs == 0 || self.window_secs > MAX_SECS {
            return Err(ValidationError::InvalidWindow);
        }
        if self.reaper_interval_secs == 0 || self.reaper_interval_secs > MAX_SECS {
            return Err(ValidationError::InvalidReaperInterval);
        }
        Ok(())
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            requests_per_window: default_requests_per_window(),
            window_secs: default_window_secs(),
            demo_message_limit: default_demo_message_limit(),
            reaper_interval_secs: default_reaper_interval_secs(),
        }
    }
}

fn default_requests_per_window() -> u32 {
    60
}

fn default_window_secs() -> u64 {
    60
}

fn default_demo_message_limit() -> u32 {
    DEFAULT_DEMO_MESSAGE_LIMIT
}

fn default_reaper_interval_secs() -> u64 {
    300
}
