//! GetRemindersHandler - Query handler for one user's reminder buckets.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::commitment::{classify_reminders_within, CommitmentError};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{Clock, CommitmentRepository, ReminderItem};

/// Query for the reminders owed to one user.
#[derive(Debug, Clone)]
pub struct GetRemindersQuery {
    pub owner: UserId,
}

/// Overdue and upcoming pending commitments, computed at `generated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemindersView {
    pub owner: UserId,
    pub overdue: Vec<ReminderItem>,
    pub upcoming: Vec<ReminderItem>,
    pub generated_at: Timestamp,
}

/// Handler for reminder queries.
pub struct GetRemindersHandler {
    repository: Arc<dyn CommitmentRepository>,
    clock: Arc<dyn Clock>,
    horizon_days: i64,
}

impl GetRemindersHandler {
    pub fn new(
        repository: Arc<dyn CommitmentRepository>,
        clock: Arc<dyn Clock>,
        horizon_days: i64,
    ) -> Self {
        Self {
            repository,
            clock,
            horizon_days,
        }
    }

    pub async fn handle(&self, query: GetRemindersQuery) -> Result<RemindersView, CommitmentError> {
        let commitments = self.repository.find_by_owner(&query.owner).await?;
        let now = self.clock.now();
        let buckets = classify_reminders_within(&commitments, now, self.horizon_days);

        Ok(RemindersView {
            owner: query.owner,
            overdue: buckets
                .overdue
                .iter()
                .filter_map(|c| ReminderItem::overdue(c, now))
                .collect(),
            upcoming: buckets
                .upcoming
                .iter()
                .filter_map(|c| ReminderItem::upcoming(c, now))
                .collect(),
            generated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::commitment::InMemoryCommitmentRepository;
    use crate::domain::commitment::Commitment;
    use crate::domain::foundation::CommitmentId;

    const NOW: i64 = 1_700_000_000_000;

    fn now() -> Timestamp {
        Timestamp::from_unix_millis(NOW).unwrap()
    }

    fn commitment(id: u64, owner: &str, deadline: Option<Timestamp>) -> Commitment {
        Commitment::new(
            CommitmentId::new(id),
            UserId::new(owner).unwrap(),
            format!("action {}", id),
            deadline,
            now().minus_days(10),
        )
        .unwrap()
    }

    fn handler(commitments: Vec<Commitment>) -> GetRemindersHandler {
        GetRemindersHandler::new(
            Arc::new(InMemoryCommitmentRepository::with_commitments(commitments)),
            Arc::new(ManualClock::at_millis(NOW)),
            3,
        )
    }

    #[tokio::test]
    async fn buckets_one_owners_pending_commitments() {
        let mut completed = commitment(4, "alice", Some(now().minus_days(1)));
        completed.update_progress(100, None, None, now()).unwrap();

        let handler = handler(vec![
            commitment(1, "alice", Some(now().minus_days(1))),
            commitment(2, "alice", Some(now().plus_days(2))),
            commitment(3, "alice", Some(now().plus_days(10))),
            completed,
            commitment(5, "bob", Some(now().minus_days(1))),
        ]);

        let view = handler
            .handle(GetRemindersQuery {
                owner: UserId::new("alice").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(view.overdue.len(), 1);
        assert_eq!(view.overdue[0].commitment_id, CommitmentId::new(1));
        assert_eq!(view.overdue[0].days, 1);
        assert_eq!(view.upcoming.len(), 1);
        assert_eq!(view.upcoming[0].commitment_id, CommitmentId::new(2));
        assert_eq!(view.upcoming[0].days, 2);
        assert_eq!(view.generated_at, now());
    }

    #[tokio::test]
    async fn unknown_owner_gets_empty_view() {
        let view = handler(vec![])
            .handle(GetRemindersQuery {
                owner: UserId::new("nobody").unwrap(),
            })
            .await
            .unwrap();

        assert!(view.overdue.is_empty());
        assert!(view.upcoming.is_empty());
    }
}
