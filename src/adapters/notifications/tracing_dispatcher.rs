//! Reminder dispatcher that writes digests to the log.
//!
//! Stands in for a real delivery channel in development and in deployments
//! where reminders are picked up from structured logs.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{ReminderDigest, ReminderDispatcher};

/// Emits one `info` event per digest and one `debug` event per item.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReminderDispatcher;

impl TracingReminderDispatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReminderDispatcher for TracingReminderDispatcher {
    async fn dispatch(&self, digest: &ReminderDigest) -> Result<(), DomainError> {
        tracing::info!(
            owner = %digest.owner,
            overdue = digest.overdue.len(),
            upcoming = digest.upcoming.len(),
            generated_at = %digest.generated_at,
            "reminder digest"
        );
        for item in &digest.overdue {
            tracing::debug!(
                owner = %digest.owner,
                commitment_id = %item.commitment_id,
                days_overdue = item.days,
                "overdue commitment"
            );
        }
        for item in &digest.upcoming {
            tracing::debug!(
                owner = %digest.owner,
                commitment_id = %item.commitment_id,
                days_until = item.days,
                "upcoming commitment"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};

    #[tokio::test]
    async fn dispatch_always_succeeds() {
        let digest = ReminderDigest {
            owner: UserId::new("user-1").unwrap(),
            overdue: vec![],
            upcoming: vec![],
            generated_at: Timestamp::now(),
        };
        assert!(TracingReminderDispatcher::new().dispatch(&digest).await.is_ok());
    }
}
