//! CommitmentStatus enum for the commitment lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Percentage, ValidationError};

/// Lifecycle status of a commitment.
///
/// Transitions are caller-driven; nothing here moves a status because a
/// deadline passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    /// Soft-terminal; replaces physical deletion.
    Missed,
}

impl CommitmentStatus {
    /// Returns true for completed or missed commitments.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CommitmentStatus::Completed | CommitmentStatus::Missed)
    }

    /// Returns true while the commitment still needs action.
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }

    /// Status implied by a progress update that carries no explicit status.
    ///
    /// - completed and missed commitments keep their status
    /// - 100 completes an open commitment
    /// - anything strictly between 0 and 100 moves `Pending` to `InProgress`
    /// - 0 leaves the current status alone
    pub fn infer_from_progress(self, progress: Percentage) -> Self {
        if self.is_terminal() || progress.is_zero() {
            return self;
        }
        if progress.is_full() {
            CommitmentStatus::Completed
        } else {
            CommitmentStatus::InProgress
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitmentStatus::Pending => "pending",
            CommitmentStatus::InProgress => "in_progress",
            CommitmentStatus::Completed => "completed",
            CommitmentStatus::Missed => "missed",
        }
    }
}

impl fmt::Display for CommitmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CommitmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CommitmentStatus::Pending),
            "in_progress" => Ok(CommitmentStatus::InProgress),
            "completed" => Ok(CommitmentStatus::Completed),
            "missed" => Ok(CommitmentStatus::Missed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}
