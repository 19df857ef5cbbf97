//! Integration tests for the commitment lifecycle.
//!
//! These tests go through the application handlers backed by the in-memory
//! repository, and check reminder classification at its boundaries.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use coaching_core::adapters::clock::ManualClock;
use coaching_core::adapters::commitment::InMemoryCommitmentRepository;
use coaching_core::application::{
    CreateCommitmentCommand, CreateCommitmentHandler, GetRemindersHandler, GetRemindersQuery,
    MarkMissedCommand, MarkMissedHandler, UpdateProgressCommand, UpdateProgressHandler,
};
use coaching_core::domain::commitment::{
    classify_reminders, days_overdue, days_until, Commitment, CommitmentError, CommitmentStatus,
};
use coaching_core::domain::foundation::{CommitmentId, Timestamp, UserId};
use coaching_core::ports::CommitmentRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

const NOW: i64 = 1_700_000_000_000;

fn now() -> Timestamp {
    Timestamp::from_unix_millis(NOW).unwrap()
}

fn owner() -> UserId {
    UserId::new("user-1").unwrap()
}

fn pending_due(id: u64, deadline: Timestamp) -> Commitment {
    Commitment::new(CommitmentId::new(id), owner(), "Walk", Some(deadline), now().minus_days(30))
        .unwrap()
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn create_progress_complete_and_remind() {
    let repo = Arc::new(InMemoryCommitmentRepository::new());
    let clock = Arc::new(ManualClock::at_millis(NOW));

    let create = CreateCommitmentHandler::new(repo.clone(), clock.clone());
    let progress = UpdateProgressHandler::new(repo.clone(), clock.clone());
    let reminders = GetRemindersHandler::new(repo.clone(), clock.clone(), 3);

    let walk = create
        .handle(CreateCommitmentCommand {
            owner: owner(),
            action: "Walk 20 minutes daily".to_string(),
            deadline: Some(now().plus_days(2)),
        })
        .await
        .unwrap();
    let call = create
        .handle(CreateCommitmentCommand {
            owner: owner(),
            action: "Call mentor".to_string(),
            deadline: Some(now().plus_days(1)),
        })
        .await
        .unwrap();

    let view = reminders
        .handle(GetRemindersQuery { owner: owner() })
        .await
        .unwrap();
    assert_eq!(view.upcoming.len(), 2);

    clock.advance(Duration::from_secs(3_600));
    let done = progress
        .handle(UpdateProgressCommand {
            commitment_id: walk.id(),
            progress: 100,
            status: None,
            note: Some("done".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(done.status(), CommitmentStatus::Completed);

    let view = reminders
        .handle(GetRemindersQuery { owner: owner() })
        .await
        .unwrap();
    assert_eq!(view.upcoming.len(), 1);
    assert_eq!(view.upcoming[0].commitment_id, call.id());

    // A day later the call is an hour overdue.
    clock.advance(Duration::from_secs(86_400));
    let view = reminders
        .handle(GetRemindersQuery { owner: owner() })
        .await
        .unwrap();
    assert_eq!(view.overdue.len(), 1);
    assert_eq!(view.overdue[0].days, 1);
}

#[tokio::test]
async fn missed_commitment_stays_stored_and_leaves_reminders() {
    let repo = Arc::new(InMemoryCommitmentRepository::with_commitments(vec![pending_due(
        1,
        now().minus_days(1),
    )]));
    let clock = Arc::new(ManualClock::at_millis(NOW));

    MarkMissedHandler::new(repo.clone(), clock.clone())
        .handle(MarkMissedCommand {
            commitment_id: CommitmentId::new(1),
            note: None,
        })
        .await
        .unwrap();

    let stored = repo.load_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status(), CommitmentStatus::Missed);
    assert!(classify_reminders(&stored, now()).is_empty());
}

#[tokio::test]
async fn progress_bounds_are_enforced() {
    let repo = Arc::new(InMemoryCommitmentRepository::with_commitments(vec![pending_due(
        1,
        now().plus_days(5),
    )]));
    let handler = UpdateProgressHandler::new(repo, Arc::new(ManualClock::at_millis(NOW)));
    let cmd = |progress| UpdateProgressCommand {
        commitment_id: CommitmentId::new(1),
        progress,
        status: None,
        note: None,
    };

    assert!(matches!(
        handler.handle(cmd(-1)).await,
        Err(CommitmentError::Validation(_))
    ));
    assert!(matches!(
        handler.handle(cmd(101)).await,
        Err(CommitmentError::Validation(_))
    ));
    assert!(handler.handle(cmd(0)).await.is_ok());
    assert!(handler.handle(cmd(100)).await.is_ok());
}

// =============================================================================
// Classification boundaries
// =============================================================================

#[test]
fn deadline_one_second_past_is_overdue() {
    let c = [pending_due(1, now().plus_secs(-1))];
    let buckets = classify_reminders(&c, now());
    assert_eq!(buckets.overdue.len(), 1);
    assert!(buckets.upcoming.is_empty());
}

#[test]
fn deadline_one_second_ahead_is_upcoming() {
    let c = [pending_due(1, now().plus_secs(1))];
    let buckets = classify_reminders(&c, now());
    assert_eq!(buckets.upcoming.len(), 1);
}

#[test]
fn horizon_edge_is_inclusive() {
    let c = [
        pending_due(1, now().plus_days(3)),
        pending_due(2, now().plus_days(3).plus_secs(1)),
    ];
    let buckets = classify_reminders(&c, now());
    assert_eq!(buckets.upcoming.len(), 1);
    assert_eq!(buckets.upcoming[0].id(), CommitmentId::new(1));
}

#[test]
fn day_counts_round_up() {
    assert_eq!(days_overdue(now().minus_days(1), now()), 1);
    assert_eq!(days_until(now().plus_days(2), now()), 2);
    assert_eq!(days_until(now().plus_secs(60), now()), 1);
}

// =============================================================================
// Properties
// =============================================================================

fn terminal_status() -> impl Strategy<Value = CommitmentStatus> {
    prop_oneof![Just(CommitmentStatus::Completed), Just(CommitmentStatus::Missed)]
}

proptest! {
    #[test]
    fn terminal_commitments_are_never_classified(
        status in terminal_status(),
        offset_secs in -30i64 * 86_400..30 * 86_400,
    ) {
        let mut c = pending_due(1, now().plus_secs(offset_secs));
        match status {
            CommitmentStatus::Missed => {
                c.mark_missed(None, now());
            }
            _ => {
                c.update_progress(100, Some(status), None, now()).unwrap();
            }
        }

        let buckets = classify_reminders(std::slice::from_ref(&c), now());
        prop_assert!(buckets.is_empty());
    }

    #[test]
    fn in_range_progress_is_always_accepted(progress in 0i64..=100) {
        let mut c = pending_due(1, now().plus_days(1));
        prop_assert!(c.update_progress(progress, None, None, now()).is_ok());
        prop_assert_eq!(i64::from(c.progress().value()), progress);
    }
}
