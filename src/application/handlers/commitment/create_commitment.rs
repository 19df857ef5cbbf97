//! CreateCommitmentHandler - Command handler for recording a new commitment.

use std::sync::Arc;

use crate::domain::commitment::{Commitment, CommitmentError};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{Clock, CommitmentRepository};

/// Command to create a commitment.
#[derive(Debug, Clone)]
pub struct CreateCommitmentCommand {
    pub owner: UserId,
    pub action: String,
    pub deadline: Option<Timestamp>,
}

/// Handler for creating commitments.
pub struct CreateCommitmentHandler {
    repository: Arc<dyn CommitmentRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateCommitmentHandler {
    pub fn new(repository: Arc<dyn CommitmentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, cmd: CreateCommitmentCommand) -> Result<Commitment, CommitmentError> {
        // 1. Allocate id
        let id = self.repository.next_id().await?;

        // 2. Build and validate
        let commitment = Commitment::new(id, cmd.owner, cmd.action, cmd.deadline, self.clock.now())?;

        // 3. Persist
        self.repository.save(&commitment).await?;

        tracing::debug!(commitment_id = %id, owner = %commitment.owner(), "commitment created");
        Ok(commitment)
    }
}
