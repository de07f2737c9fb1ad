//! The approve/reject protocol: two-document moves over a store that can
//! only replace one document at a time.

use curator_store::DocumentStore;
use curator_types::{Bucket, CollectionDocument, Message};
use tracing::info;

use crate::error::ModerationError;
use crate::repository::{BucketMove, Repository};

/// Moderation context: one store, one snapshot, no ambient state.
///
/// Mutations run one at a time — the console is sequential by construction —
/// and the store's revision check is the only guard against a concurrent
/// editor elsewhere. There is no rollback across the two writes of a move:
/// a second-write failure is surfaced as [`ModerationError::PartialWrite`]
/// and the snapshot stays on the pre-move state so the divergence from
/// storage is detectable.
pub struct Moderation<S> {
    store: S,
    repository: Repository,
}

impl<S: DocumentStore> Moderation<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            repository: Repository::default(),
        }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Discard the snapshot and rebuild it from storage.
    pub async fn reload(&mut self) -> &Repository {
        self.repository = Repository::load_all(&self.store).await;
        &self.repository
    }

    /// Move a pending message to `approved`, stamping the supplied tags
    /// (trimmed, empties dropped).
    ///
    /// Pending is persisted first, then approved, each write re-reading its
    /// own revision. Only when both land does the snapshot advance.
    pub async fn approve(&mut self, id: &str, tags: &[String]) -> Result<Message, ModerationError> {
        if !self.store.can_write() {
            return Err(ModerationError::Unauthorized);
        }
        let BucketMove {
            pending,
            destination,
            message,
        } = self
            .repository
            .move_to_approved(id, normalize_tags(tags))
            .ok_or_else(|| ModerationError::NotFound(id.to_string()))?;

        self.persist(Bucket::Approved, &pending, &destination).await?;

        self.repository.pending = pending;
        self.repository.approved = destination;
        info!(id, "message approved");
        Ok(message)
    }

    /// Move a pending message to the rejected log.
    ///
    /// The rejected document accumulates across sessions, so it is re-read
    /// from storage immediately before the move — a stale copy must never be
    /// written back. Write order and partial-failure semantics match
    /// [`Moderation::approve`].
    pub async fn reject(&mut self, id: &str) -> Result<Message, ModerationError> {
        if !self.store.can_write() {
            return Err(ModerationError::Unauthorized);
        }
        let (rejected, _) = self.store.read(Bucket::Rejected).await;
        let BucketMove {
            pending,
            destination,
            message,
        } = self
            .repository
            .move_to_rejected(id, rejected.messages)
            .ok_or_else(|| ModerationError::NotFound(id.to_string()))?;

        self.persist(Bucket::Rejected, &pending, &destination).await?;

        self.repository.pending = pending;
        info!(id, "message rejected");
        Ok(message)
    }

    /// The two ordered writes shared by both transitions: pending first,
    /// then the destination bucket. A destination failure after pending
    /// landed is the accepted consistency gap — reported, never rolled back.
    async fn persist(
        &self,
        destination: Bucket,
        pending: &[Message],
        moved: &[Message],
    ) -> Result<(), ModerationError> {
        self.store
            .write(Bucket::Pending, &CollectionDocument::new(pending.to_vec()))
            .await?;
        self.store
            .write(destination, &CollectionDocument::new(moved.to_vec()))
            .await
            .map_err(|source| ModerationError::PartialWrite {
                persisted: Bucket::Pending,
                failed: destination,
                source,
            })?;
        Ok(())
    }
}

/// Trim tags and drop the empties; order is preserved.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_trimmed_and_empties_dropped() {
        let tags = vec![
            "news".to_string(),
            " update".to_string(),
            "  ".to_string(),
            String::new(),
        ];
        assert_eq!(normalize_tags(&tags), vec!["news", "update"]);
    }

    #[test]
    fn tag_order_is_preserved() {
        let tags = vec!["b".to_string(), "a".to_string(), "c ".to_string()];
        assert_eq!(normalize_tags(&tags), vec!["b", "a", "c"]);
    }
}
