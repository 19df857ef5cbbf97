//! MarkMissedHandler - Command handler for abandoning a commitment.

use std::sync::Arc;

use crate::domain::commitment::{Commitment, CommitmentError};
use crate::domain::foundation::CommitmentId;
use crate::ports::{Clock, CommitmentRepository};

/// Command to mark a commitment as missed.
#[derive(Debug, Clone)]
pub struct MarkMissedCommand {
    pub commitment_id: CommitmentId,
    pub note: Option<String>,
}

/// Handler for marking commitments missed.
pub struct MarkMissedHandler {
    repository: Arc<dyn CommitmentRepository>,
    clock: Arc<dyn Clock>,
}

impl MarkMissedHandler {
    pub fn new(repository: Arc<dyn CommitmentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, cmd: MarkMissedCommand) -> Result<Commitment, CommitmentError> {
        let now = self.clock.now();
        let mut note = cmd.note;
        let commitment = self
            .repository
            .update(cmd.commitment_id, &mut |commitment: &mut Commitment| {
                commitment.mark_missed(note.take(), now);
                Ok(())
            })
            .await?;

        tracing::debug!(commitment_id = %cmd.commitment_id, "commitment marked missed");
        Ok(commitment)
    }
}
