//! Commitment aggregate entity.
//!
//! A commitment is an action a user promised during coaching, optionally
//! bounded by a deadline. It is mutated only through explicit progress
//! updates, each of which appends to its history.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommitmentId, Percentage, Timestamp, UserId, ValidationError};

use super::errors::CommitmentError;
use super::reminders::Urgency;
use super::status::CommitmentStatus;

/// Maximum length for a commitment's action text.
pub const MAX_ACTION_LENGTH: usize = 1_000;

/// One recorded update in a commitment's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub progress: Percentage,
    pub status: CommitmentStatus,
    pub note: Option<String>,
    pub recorded_at: Timestamp,
}

/// Commitment aggregate.
///
/// # Invariants
///
/// - `id` never changes after creation
/// - `action` is 1-1000 characters, non-blank
/// - `history` is append-only and ordered by `recorded_at`
/// - `progress == 100` with a status other than `completed` is allowed;
///   the coupling is advisory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    id: CommitmentId,
    owner: UserId,
    action: String,
    deadline: Option<Timestamp>,
    status: CommitmentStatus,
    progress: Percentage,
    history: Vec<ProgressEntry>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Commitment {
    /// Create a new pending commitment at 0% progress.
    ///
    /// # Errors
    ///
    /// - `Validation` if the action is blank or too long
    pub fn new(
        id: CommitmentId,
        owner: UserId,
        action: impl Into<String>,
        deadline: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<Self, CommitmentError> {
        let action = action.into();
        Self::validate_action(&action)?;

        Ok(Self {
            id,
            owner,
            action,
            deadline,
            status: CommitmentStatus::Pending,
            progress: Percentage::ZERO,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a commitment from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CommitmentId,
        owner: UserId,
        action: String,
        deadline: Option<Timestamp>,
        status: CommitmentStatus,
        progress: Percentage,
        history: Vec<ProgressEntry>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            action,
            deadline,
            status,
            progress,
            history,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> CommitmentId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn deadline(&self) -> Option<Timestamp> {
        self.deadline
    }

    pub fn status(&self) -> CommitmentStatus {
        self.status
    }

    pub fn progress(&self) -> Percentage {
        self.progress
    }

    /// Prior updates, oldest first.
    pub fn history(&self) -> &[ProgressEntry] {
        &self.history
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Urgency of this commitment at `now`, if it is open and has a deadline.
    pub fn urgency(&self, now: Timestamp, horizon_days: i64) -> Option<Urgency> {
        if self.status.is_terminal() {
            return None;
        }
        self.deadline
            .map(|deadline| Urgency::of(deadline, now, horizon_days))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record progress, optionally overriding the inferred status.
    ///
    /// Without an explicit status, the status is inferred from `progress`
    /// (see [`CommitmentStatus::infer_from_progress`]); completed and missed
    /// commitments only change status when the caller names one.
    ///
    /// # Errors
    ///
    /// - `Validation` if `progress` is outside 0..=100; nothing is recorded
    pub fn update_progress(
        &mut self,
        progress: i64,
        status: Option<CommitmentStatus>,
        note: Option<String>,
        now: Timestamp,
    ) -> Result<&ProgressEntry, CommitmentError> {
        let progress = Percentage::try_for("progress", progress)?;
        let status = status.unwrap_or_else(|| self.status.infer_from_progress(progress));

        self.progress = progress;
        self.status = status;
        Ok(self.record(note, now))
    }

    /// Abandon the commitment. It stays stored with status `missed`.
    pub fn mark_missed(&mut self, note: Option<String>, now: Timestamp) -> &ProgressEntry {
        self.status = CommitmentStatus::Missed;
        self.record(note, now)
    }

    fn record(&mut self, note: Option<String>, now: Timestamp) -> &ProgressEntry {
        // Keep history ordered even if the caller's clock steps backwards.
        let recorded_at = match self.history.last() {
            Some(last) if now < last.recorded_at => last.recorded_at,
            _ => now,
        };
        self.history.push(ProgressEntry {
            progress: self.progress,
            status: self.status,
            note: note.filter(|n| !n.trim().is_empty()),
            recorded_at,
        });
        self.updated_at = recorded_at;
        &self.history[self.history.len() - 1]
    }

    fn validate_action(action: &str) -> Result<(), ValidationError> {
        if action.trim().is_empty() {
            return Err(ValidationError::empty_field("action"));
        }
        let len = action.chars().count();
        if len > MAX_ACTION_LENGTH {
            return Err(ValidationError::out_of_range(
                "action",
                1,
                MAX_ACTION_LENGTH as i64,
                len as i64,
            ));
        }
        Ok(())
    }
}
