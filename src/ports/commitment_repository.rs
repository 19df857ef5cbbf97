//! Commitment repository port.
//!
//! Defines the contract for loading and saving Commitment aggregates. The
//! domain operates on in-memory values; changes to a stored commitment go
//! through `update` so concurrent writers cannot drop history entries.
//!
//! # Design
//!
//! - **Load-all / save-one**: reminders classify the whole set, updates
//!   write one record
//! - **Per-id read-modify-write**: `update` runs the mutation atomically
//!   with respect to other writers of the same id
//! - **Numeric ids**: the store assigns ids via `next_id`
//! - **No deletes**: abandoned commitments are saved with status `missed`

use async_trait::async_trait;

use crate::domain::commitment::{Commitment, CommitmentError};
use crate::domain::foundation::{CommitmentId, DomainError, UserId};

/// Repository port for Commitment persistence.
#[async_trait]
pub trait CommitmentRepository: Send + Sync {
    /// Reserve the id for a new commitment.
    async fn next_id(&self) -> Result<CommitmentId, DomainError>;

    /// Insert or replace a commitment keyed by its id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, commitment: &Commitment) -> Result<(), DomainError>;

    /// Apply `apply` to the stored commitment and persist the result.
    ///
    /// The read, the mutation and the write are serialized against other
    /// writers of the same id. Nothing is written if `apply` fails.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no commitment has this id
    /// - whatever `apply` returns
    /// - `Infrastructure` on persistence failure
    async fn update(
        &self,
        id: CommitmentId,
        apply: &mut (dyn for<'c> FnMut(&'c mut Commitment) -> Result<(), CommitmentError> + Send),
    ) -> Result<Commitment, CommitmentError>;

    /// Find a commitment by id. Returns `None` if not found.
    async fn find_by_id(&self, id: CommitmentId) -> Result<Option<Commitment>, DomainError>;

    /// All commitments owned by a user, ordered by id.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Commitment>, DomainError>;

    /// Every stored commitment, ordered by id.
    async fn load_all(&self) -> Result<Vec<Commitment>, DomainError>;
}
