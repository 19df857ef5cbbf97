//! In-memory commitment repository.
//!
//! Useful for:
//! - Development and testing environments
//! - Single-process deployments where commitments need not survive restarts
//!
//! Ids are allocated from a monotonically increasing counter starting at 1.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::domain::commitment::{Commitment, CommitmentError};
use crate::domain::foundation::{CommitmentId, DomainError, UserId};
use crate::ports::CommitmentRepository;

/// In-memory implementation of the CommitmentRepository port.
#[derive(Debug, Default)]
pub struct InMemoryCommitmentRepository {
    commitments: RwLock<BTreeMap<CommitmentId, Commitment>>,
    last_id: AtomicU64,
}

impl InMemoryCommitmentRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-loaded with commitments.
    ///
    /// Later allocations continue after the highest seeded id.
    pub fn with_commitments(commitments: impl IntoIterator<Item = Commitment>) -> Self {
        let map: BTreeMap<_, _> = commitments.into_iter().map(|c| (c.id(), c)).collect();
        let last_id = map.keys().next_back().map(|id| id.value()).unwrap_or(0);
        Self {
            commitments: RwLock::new(map),
            last_id: AtomicU64::new(last_id),
        }
    }

    /// Returns the number of stored commitments.
    pub async fn len(&self) -> usize {
        self.commitments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.commitments.read().await.is_empty()
    }
}

#[async_trait]
impl CommitmentRepository for InMemoryCommitmentRepository {
    async fn next_id(&self) -> Result<CommitmentId, DomainError> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(CommitmentId::new(id))
    }

    async fn save(&self, commitment: &Commitment) -> Result<(), DomainError> {
        self.commitments
            .write()
            .await
            .insert(commitment.id(), commitment.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: CommitmentId,
        apply: &mut (dyn for<'c> FnMut(&'c mut Commitment) -> Result<(), CommitmentError> + Send),
    ) -> Result<Commitment, CommitmentError> {
        let mut commitments = self.commitments.write().await;
        let mut next = commitments
            .get(&id)
            .cloned()
            .ok_or_else(|| CommitmentError::not_found(id))?;
        apply(&mut next)?;
        commitments.insert(id, next.clone());
        Ok(next)
    }

    async fn find_by_id(&self, id: CommitmentId) -> Result<Option<Commitment>, DomainError> {
        Ok(self.commitments.read().await.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Commitment>, DomainError> {
        Ok(self
            .commitments
            .read()
            .await
            .values()
            .filter(|c| c.owner() == owner)
            .cloned()
            .collect())
    }

    async fn load_all(&self) -> Result<Vec<Commitment>, DomainError> {
        Ok(self.commitments.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn commitment(id: u64, owner: &str) -> Commitment {
        Commitment::new(
            CommitmentId::new(id),
            UserId::new(owner).unwrap(),
            format!("action {}", id),
            None,
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn next_id_is_monotonic() {
        let repo = InMemoryCommitmentRepository::new();
        assert_eq!(repo.next_id().await.unwrap(), CommitmentId::new(1));
        assert_eq!(repo.next_id().await.unwrap(), CommitmentId::new(2));
    }

    #[tokio::test]
    async fn seeded_repository_continues_after_highest_id() {
        let repo = InMemoryCommitmentRepository::with_commitments(vec![
            commitment(4, "a"),
            commitment(9, "a"),
        ]);
        assert_eq!(repo.next_id().await.unwrap(), CommitmentId::new(10));
    }

    #[tokio::test]
    async fn save_replaces_by_id() {
        let repo = InMemoryCommitmentRepository::new();
        let mut c = commitment(1, "a");
        repo.save(&c).await.unwrap();
        c.mark_missed(None, Timestamp::now());
        repo.save(&c).await.unwrap();

        assert_eq!(repo.len().await, 1);
        let stored = repo.find_by_id(CommitmentId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored, c);
    }

    #[tokio::test]
    async fn find_by_owner_filters_and_orders() {
        let repo = InMemoryCommitmentRepository::with_commitments(vec![
            commitment(3, "a"),
            commitment(1, "a"),
            commitment(2, "b"),
        ]);
        let owned = repo.find_by_owner(&UserId::new("a").unwrap()).await.unwrap();
        let ids: Vec<u64> = owned.iter().map(|c| c.id().value()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(repo.load_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_persists_mutation() {
        let repo = InMemoryCommitmentRepository::with_commitments(vec![commitment(1, "a")]);

        let updated = repo
            .update(CommitmentId::new(1), &mut |c: &mut Commitment| {
                c.mark_missed(None, Timestamp::now());
                Ok(())
            })
            .await
            .unwrap();

        let stored = repo.find_by_id(CommitmentId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.history().len(), 1);
    }

    #[tokio::test]
    async fn failed_update_leaves_stored_commitment_untouched() {
        let repo = InMemoryCommitmentRepository::with_commitments(vec![commitment(1, "a")]);

        let result = repo
            .update(CommitmentId::new(1), &mut |c: &mut Commitment| -> Result<(), CommitmentError> {
                c.mark_missed(None, Timestamp::now());
                c.update_progress(101, None, None, Timestamp::now())?;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(CommitmentError::Validation(_))));
        let stored = repo.find_by_id(CommitmentId::new(1)).await.unwrap().unwrap();
        assert!(stored.history().is_empty());
    }

    #[tokio::test]
    async fn update_reports_missing_id() {
        let repo = InMemoryCommitmentRepository::new();
        let result = repo
            .update(CommitmentId::new(7), &mut |_: &mut Commitment| Ok(()))
            .await;
        assert_eq!(result, Err(CommitmentError::NotFound(CommitmentId::new(7))));
    }

    #[tokio::test]
    async fn find_by_id_returns_none_when_missing() {
        let repo = InMemoryCommitmentRepository::new();
        assert!(repo.find_by_id(CommitmentId::new(5)).await.unwrap().is_none());
    }
}
