//! Reminder dispatcher port.
//!
//! Receives the per-user output of reminder classification. Actual delivery
//! (email, push) happens behind this port.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::commitment::{days_overdue, days_until, Commitment};
use crate::domain::foundation::{CommitmentId, DomainError, Timestamp, UserId};

/// A single commitment mentioned in a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderItem {
    pub commitment_id: CommitmentId,
    pub action: String,
    pub deadline: Timestamp,
    /// Days overdue for overdue items, days remaining for upcoming ones.
    pub days: i64,
}

impl ReminderItem {
    /// Builds an item for an overdue commitment. Returns `None` if undated.
    pub fn overdue(commitment: &Commitment, now: Timestamp) -> Option<Self> {
        let deadline = commitment.deadline()?;
        Some(Self {
            commitment_id: commitment.id(),
            action: commitment.action().to_string(),
            deadline,
            days: days_overdue(deadline, now),
        })
    }

    /// Builds an item for an upcoming commitment. Returns `None` if undated.
    pub fn upcoming(commitment: &Commitment, now: Timestamp) -> Option<Self> {
        let deadline = commitment.deadline()?;
        Some(Self {
            commitment_id: commitment.id(),
            action: commitment.action().to_string(),
            deadline,
            days: days_until(deadline, now),
        })
    }
}

/// Everything one user should be reminded about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderDigest {
    pub owner: UserId,
    pub overdue: Vec<ReminderItem>,
    pub upcoming: Vec<ReminderItem>,
    pub generated_at: Timestamp,
}

impl ReminderDigest {
    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.upcoming.is_empty()
    }
}

/// Port for handing reminder digests to a delivery channel.
#[async_trait]
pub trait ReminderDispatcher: Send + Sync {
    /// Deliver one user's digest.
    ///
    /// # Errors
    ///
    /// - `NotificationError` if the channel rejects the digest
    async fn dispatch(&self, digest: &ReminderDigest) -> Result<(), DomainError>;
}
