//! Reminder configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::commitment::DEFAULT_UPCOMING_HORIZON_DAYS;

/// Reminder classification settings
#[derive(Debug, Clone, Deserialize)]
pub struct RemindersConfig {
    /// Days ahead that count as "upcoming"
    #[serde(default = "default_upcoming_horizon_days")]
    pub upcoming_horizon_days: i64,
}

impl RemindersConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0..=365).contains(&self.upcoming_horizon_days) {
            return Err(ValidationError::InvalidHorizon);
        }
        Ok(())
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            upcoming_horizon_days: default_upcoming_horizon_days(),
        }
    }
}

fn default_upcoming_horizon_days() -> i64 {
    DEFAULT_UPCOMING_HORIZON_DAYS
}
