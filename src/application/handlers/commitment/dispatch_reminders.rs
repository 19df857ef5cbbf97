//! DispatchRemindersHandler - Batch job that hands out reminder digests.
//!
//! Loads every commitment, classifies the pending ones, groups them per
//! owner and passes one digest per owner to the dispatcher. A failed
//! delivery is logged and counted; the rest of the batch still goes out.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::commitment::{classify_reminders_within, CommitmentError};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{Clock, CommitmentRepository, ReminderDigest, ReminderDispatcher, ReminderItem};

/// Outcome of one dispatch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchRemindersResult {
    pub digests_sent: usize,
    pub failures: usize,
}

/// Handler for the reminder dispatch batch.
pub struct DispatchRemindersHandler {
    repository: Arc<dyn CommitmentRepository>,
    dispatcher: Arc<dyn ReminderDispatcher>,
    clock: Arc<dyn Clock>,
    horizon_days: i64,
}

impl DispatchRemindersHandler {
    pub fn new(
        repository: Arc<dyn CommitmentRepository>,
        dispatcher: Arc<dyn ReminderDispatcher>,
        clock: Arc<dyn Clock>,
        horizon_days: i64,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            clock,
            horizon_days,
        }
    }

    /// Runs one batch.
    ///
    /// # Errors
    ///
    /// - `Infrastructure` only if loading commitments fails
    pub async fn handle(&self) -> Result<DispatchRemindersResult, CommitmentError> {
        let commitments = self.repository.load_all().await?;
        let now = self.clock.now();
        let buckets = classify_reminders_within(&commitments, now, self.horizon_days);

        let mut digests: BTreeMap<UserId, ReminderDigest> = BTreeMap::new();
        for commitment in &buckets.overdue {
            if let Some(item) = ReminderItem::overdue(commitment, now) {
                digest_for(&mut digests, commitment.owner(), now).overdue.push(item);
            }
        }
        for commitment in &buckets.upcoming {
            if let Some(item) = ReminderItem::upcoming(commitment, now) {
                digest_for(&mut digests, commitment.owner(), now).upcoming.push(item);
            }
        }

        let mut result = DispatchRemindersResult::default();
        for digest in digests.values() {
            match self.dispatcher.dispatch(digest).await {
                Ok(()) => result.digests_sent += 1,
                Err(e) => {
                    tracing::warn!(owner = %digest.owner, error = %e, "reminder dispatch failed");
                    result.failures += 1;
                }
            }
        }

        tracing::info!(
            digests_sent = result.digests_sent,
            failures = result.failures,
            "reminder dispatch complete"
        );
        Ok(result)
    }
}

fn digest_for<'a>(
    digests: &'a mut BTreeMap<UserId, ReminderDigest>,
    owner: &UserId,
    now: Timestamp,
) -> &'a mut ReminderDigest {
    digests
        .entry(owner.clone())
        .or_insert_with(|| ReminderDigest {
            owner: owner.clone(),
            overdue: Vec::new(),
            upcoming: Vec::new(),
            generated_at: now,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::commitment::InMemoryCommitmentRepository;
    use crate::domain::commitment::Commitment;
    use crate::domain::foundation::{CommitmentId, DomainError, ErrorCode};
    use async_trait::async_trait;
    use std::sync::Mutex;

    const NOW: i64 = 1_700_000_000_000;

    fn now() -> Timestamp {
        Timestamp::from_unix_millis(NOW).unwrap()
    }

    struct MockDispatcher {
        delivered: Mutex<Vec<ReminderDigest>>,
        reject_owner: Option<UserId>,
    }

    impl MockDispatcher {
        fn new() -> Self {
            Self {
                delivered: Mutex::new(Vec::new()),
                reject_owner: None,
            }
        }

        fn rejecting(owner: &str) -> Self {
            Self {
                delivered: Mutex::new(Vec::new()),
                reject_owner: Some(UserId::new(owner).unwrap()),
            }
        }

        fn delivered(&self) -> Vec<ReminderDigest> {
            self.delivered.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReminderDispatcher for MockDispatcher {
        async fn dispatch(&self, digest: &ReminderDigest) -> Result<(), DomainError> {
            if self.reject_owner.as_ref() == Some(&digest.owner) {
                return Err(DomainError::new(
                    ErrorCode::NotificationError,
                    "Simulated delivery failure",
                ));
            }
            self.delivered.lock().unwrap().push(digest.clone());
            Ok(())
        }
    }

    fn commitment(id: u64, owner: &str, deadline: Timestamp) -> Commitment {
        Commitment::new(
            CommitmentId::new(id),
            UserId::new(owner).unwrap(),
            format!("action {}", id),
            Some(deadline),
            now().minus_days(10),
        )
        .unwrap()
    }

    fn repo() -> Arc<InMemoryCommitmentRepository> {
        Arc::new(InMemoryCommitmentRepository::with_commitments(vec![
            commitment(1, "alice", now().minus_days(2)),
            commitment(2, "alice", now().plus_days(1)),
            commitment(3, "bob", now().plus_days(2)),
            commitment(4, "carol", now().plus_days(30)),
        ]))
    }

    fn handler(dispatcher: Arc<MockDispatcher>) -> DispatchRemindersHandler {
        DispatchRemindersHandler::new(repo(), dispatcher, Arc::new(ManualClock::at_millis(NOW)), 3)
    }

    #[tokio::test]
    async fn sends_one_digest_per_owner_with_reminders() {
        let dispatcher = Arc::new(MockDispatcher::new());

        let result = handler(dispatcher.clone()).handle().await.unwrap();

        assert_eq!(result, DispatchRemindersResult { digests_sent: 2, failures: 0 });
        let delivered = dispatcher.delivered();
        assert_eq!(delivered[0].owner.as_str(), "alice");
        assert_eq!(delivered[0].overdue.len(), 1);
        assert_eq!(delivered[0].upcoming.len(), 1);
        assert_eq!(delivered[1].owner.as_str(), "bob");
        assert!(delivered[1].overdue.is_empty());
        assert_eq!(delivered[1].upcoming.len(), 1);
    }

    #[tokio::test]
    async fn failed_delivery_does_not_abort_batch() {
        let dispatcher = Arc::new(MockDispatcher::rejecting("alice"));

        let result = handler(dispatcher.clone()).handle().await.unwrap();

        assert_eq!(result, DispatchRemindersResult { digests_sent: 1, failures: 1 });
        assert_eq!(dispatcher.delivered()[0].owner.as_str(), "bob");
    }

    #[tokio::test]
    async fn nothing_to_send_when_no_commitments() {
        let dispatcher = Arc::new(MockDispatcher::new());
        let handler = DispatchRemindersHandler::new(
            Arc::new(InMemoryCommitmentRepository::new()),
            dispatcher.clone(),
            Arc::new(ManualClock::at_millis(NOW)),
            3,
        );

        let result = handler.handle().await.unwrap();

        assert_eq!(result, DispatchRemindersResult::default());
        assert!(dispatcher.delivered().is_empty());
    }
}
