//! UpdateProgressHandler - Command handler for recording progress.

use std::sync::Arc;

use crate::domain::commitment::{Commitment, CommitmentError, CommitmentStatus};
use crate::domain::foundation::CommitmentId;
use crate::ports::{Clock, CommitmentRepository};

/// Command to record progress against a commitment.
///
/// `progress` is taken raw so out-of-range values reach domain validation.
#[derive(Debug, Clone)]
pub struct UpdateProgressCommand {
    pub commitment_id: CommitmentId,
    pub progress: i64,
    pub status: Option<CommitmentStatus>,
    pub note: Option<String>,
}

/// Handler for progress updates.
pub struct UpdateProgressHandler {
    repository: Arc<dyn CommitmentRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateProgressHandler {
    pub fn new(repository: Arc<dyn CommitmentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, cmd: UpdateProgressCommand) -> Result<Commitment, CommitmentError> {
        let now = self.clock.now();
        let mut note = cmd.note;

        // Load, apply and persist under the repository's per-id update
        let commitment = self
            .repository
            .update(cmd.commitment_id, &mut |commitment: &mut Commitment| -> Result<(), CommitmentError> {
                commitment.update_progress(cmd.progress, cmd.status, note.take(), now)?;
                Ok(())
            })
            .await?;

        tracing::debug!(
            commitment_id = %cmd.commitment_id,
            progress = commitment.progress().value(),
            status = %commitment.status(),
            "commitment progress recorded"
        );
        Ok(commitment)
    }
}
