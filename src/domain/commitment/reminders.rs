//! Read-time urgency classification of commitments.
//!
//! Everything here is a pure function of the commitment set and `now`.
//! Results are never stored; callers re-derive them on every read.

use serde::Serialize;

use crate::domain::foundation::{Timestamp, MILLIS_PER_DAY};

use super::aggregate::Commitment;
use super::status::CommitmentStatus;

/// How far ahead a deadline counts as upcoming.
pub const DEFAULT_UPCOMING_HORIZON_DAYS: i64 = 3;

/// Urgency bucket of an open, dated commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Deadline strictly before now.
    Overdue,
    /// Deadline within `[now, now + horizon]`.
    DueSoon,
    /// Deadline beyond the horizon.
    OnTrack,
}

impl Urgency {
    /// Buckets a deadline relative to `now`.
    pub fn of(deadline: Timestamp, now: Timestamp, horizon_days: i64) -> Self {
        if deadline < now {
            Urgency::Overdue
        } else if deadline <= now.plus_days(horizon_days) {
            Urgency::DueSoon
        } else {
            Urgency::OnTrack
        }
    }
}

/// Pending commitments that warrant a reminder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderBuckets<'a> {
    pub overdue: Vec<&'a Commitment>,
    pub upcoming: Vec<&'a Commitment>,
}

impl ReminderBuckets<'_> {
    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.upcoming.is_empty()
    }
}

/// Classifies pending commitments with the default three-day horizon.
pub fn classify_reminders(commitments: &[Commitment], now: Timestamp) -> ReminderBuckets<'_> {
    classify_reminders_within(commitments, now, DEFAULT_UPCOMING_HORIZON_DAYS)
}

/// Classifies pending commitments into overdue and upcoming buckets.
///
/// Only `pending` commitments with a deadline are considered; anything in
/// progress, completed or missed is left out regardless of its deadline.
/// Input order is preserved within each bucket.
pub fn classify_reminders_within(
    commitments: &[Commitment],
    now: Timestamp,
    horizon_days: i64,
) -> ReminderBuckets<'_> {
    let mut buckets = ReminderBuckets::default();
    for commitment in commitments {
        if commitment.status() != CommitmentStatus::Pending {
            continue;
        }
        let Some(deadline) = commitment.deadline() else {
            continue;
        };
        match Urgency::of(deadline, now, horizon_days) {
            Urgency::Overdue => buckets.overdue.push(commitment),
            Urgency::DueSoon => buckets.upcoming.push(commitment),
            Urgency::OnTrack => {}
        }
    }
    buckets
}

/// Whole days a deadline has passed, rounded up. Display only.
pub fn days_overdue(deadline: Timestamp, now: Timestamp) -> i64 {
    ceil_days(now.millis_since(&deadline))
}

/// Whole days until a deadline, rounded up. `0` means due today, not overdue.
pub fn days_until(deadline: Timestamp, now: Timestamp) -> i64 {
    ceil_days(deadline.millis_since(&now))
}

fn ceil_days(millis: i64) -> i64 {
    // Integer division truncates toward zero, which is already the ceiling
    // for negative values.
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}
