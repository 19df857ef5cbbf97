//! HTTP DTOs for commitment endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::domain::commitment::{Commitment, CommitmentStatus, ProgressEntry};
use crate::domain::foundation::{Timestamp, ValidationError};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a commitment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommitmentRequest {
    pub owner: String,
    pub action: String,
    #[serde(default)]
    pub deadline: Option<Timestamp>,
}

/// Request to record progress.
///
/// `progress` accepts any JSON number so floats and oversized integers are
/// reported as validation failures rather than body rejections.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProgressRequest {
    pub progress: Number,
    #[serde(default)]
    pub status: Option<CommitmentStatus>,
    #[serde(default)]
    pub note: Option<String>,
}

impl UpdateProgressRequest {
    /// Whole-number progress; range checks are left to the domain.
    pub fn progress(&self) -> Result<i64, ValidationError> {
        if let Some(value) = self.progress.as_i64() {
            return Ok(value);
        }
        if self.progress.is_u64() {
            return Err(ValidationError::out_of_range("progress", 0, 100, i64::MAX));
        }
        Err(ValidationError::invalid_format(
            "progress",
            format!("expected a whole number, got {}", self.progress),
        ))
    }
}

/// Request to mark a commitment missed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkMissedRequest {
    #[serde(default)]
    pub note: Option<String>,
}

/// Query parameters for the reminders endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RemindersQueryParams {
    pub owner: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Commitment as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitmentResponse {
    pub id: u64,
    pub owner: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Timestamp>,
    pub status: CommitmentStatus,
    pub progress: u8,
    pub history: Vec<ProgressEntry>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Commitment> for CommitmentResponse {
    fn from(commitment: Commitment) -> Self {
        Self {
            id: commitment.id().value(),
            owner: commitment.owner().to_string(),
            action: commitment.action().to_string(),
            deadline: commitment.deadline(),
            status: commitment.status(),
            progress: commitment.progress().value(),
            history: commitment.history().to_vec(),
            created_at: commitment.created_at(),
            updated_at: commitment.updated_at(),
        }
    }
}
