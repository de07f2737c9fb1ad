use curator_store::DocumentStore;
use curator_types::{Bucket, Message, MessageStatus};
use tracing::debug;

/// Session-local mirror of the operator-visible buckets.
///
/// Rebuilt wholesale by [`Repository::load_all`]; never persisted itself.
/// The rejected log is deliberately not mirrored — it is re-read from
/// storage every time a reject needs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Repository {
    pub pending: Vec<Message>,
    pub approved: Vec<Message>,
    pub published: Vec<Message>,
}

/// The outcome of a pure in-memory move: the post-move pending list, the
/// post-move destination list and the message itself, already stamped.
/// Nothing is persisted and the repository is untouched — committing is the
/// caller's job once both writes have landed.
#[derive(Debug, Clone)]
pub struct BucketMove {
    pub pending: Vec<Message>,
    pub destination: Vec<Message>,
    pub message: Message,
}

impl Repository {
    /// Fetch the three visible buckets concurrently. A bucket that cannot
    /// be read comes back empty; the load as a whole never fails.
    pub async fn load_all<S: DocumentStore>(store: &S) -> Self {
        let (pending, approved, published) = tokio::join!(
            store.read(Bucket::Pending),
            store.read(Bucket::Approved),
            store.read(Bucket::Published),
        );
        let repository = Self {
            pending: pending.0.messages,
            approved: approved.0.messages,
            published: published.0.messages,
        };
        debug!(
            pending = repository.pending.len(),
            approved = repository.approved.len(),
            published = repository.published.len(),
            "collections loaded"
        );
        repository
    }

    /// The messages of a visible bucket, in insertion order. `None` for the
    /// rejected log, which is not mirrored.
    pub fn bucket(&self, bucket: Bucket) -> Option<&[Message]> {
        match bucket {
            Bucket::Pending => Some(&self.pending),
            Bucket::Approved => Some(&self.approved),
            Bucket::Published => Some(&self.published),
            Bucket::Rejected => None,
        }
    }

    pub fn find(&self, bucket: Bucket, id: &str) -> Option<&Message> {
        self.bucket(bucket)?.iter().find(|m| m.id == id)
    }

    /// Locate a message in any visible bucket.
    pub fn find_anywhere(&self, id: &str) -> Option<(Bucket, &Message)> {
        Bucket::VISIBLE
            .iter()
            .find_map(|&bucket| Some((bucket, self.find(bucket, id)?)))
    }

    /// Pure transform for an approve: remove from pending, stamp status and
    /// tags, append to the current approved list. `None` when the id is not
    /// pending.
    pub fn move_to_approved(&self, id: &str, tags: Vec<String>) -> Option<BucketMove> {
        let mut message = self.find(Bucket::Pending, id)?.clone();
        message.status = MessageStatus::Approved;
        message.tags = Some(tags);

        let mut destination = self.approved.clone();
        destination.push(message.clone());
        Some(BucketMove {
            pending: self.without_pending(id),
            destination,
            message,
        })
    }

    /// Pure transform for a reject. The caller supplies the current rejected
    /// log (freshly read — it accumulates and must never be rebuilt from a
    /// stale copy); the message is appended after its existing entries.
    pub fn move_to_rejected(&self, id: &str, rejected_log: Vec<Message>) -> Option<BucketMove> {
        let mut message = self.find(Bucket::Pending, id)?.clone();
        message.status = MessageStatus::Rejected;

        let mut destination = rejected_log;
        destination.push(message.clone());
        Some(BucketMove {
            pending: self.without_pending(id),
            destination,
            message,
        })
    }

    fn without_pending(&self, id: &str) -> Vec<Message> {
        self.pending
            .iter()
            .filter(|m| m.id != id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str) -> Message {
        Message {
            id: id.to_string(),
            content: "Hello".to_string(),
            timestamp: "2024-01-01T00:00:00Z".parse().unwrap(),
            status: MessageStatus::Pending,
            tags: None,
            images: None,
        }
    }

    fn repository() -> Repository {
        Repository {
            pending: vec![message("a"), message("b")],
            approved: vec![message("old")],
            published: vec![],
        }
    }

    #[test]
    fn move_to_approved_is_pure() {
        let repo = repository();
        let moved = repo.move_to_approved("a", vec!["news".into()]).unwrap();

        assert_eq!(moved.message.status, MessageStatus::Approved);
        assert_eq!(moved.message.tags.as_deref(), Some(&["news".to_string()][..]));
        assert_eq!(moved.pending.len(), 1);
        assert_eq!(moved.pending[0].id, "b");
        let ids: Vec<&str> = moved.destination.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "a"]);

        // The repository itself did not change.
        assert_eq!(repo.pending.len(), 2);
        assert_eq!(repo.approved.len(), 1);
    }

    #[test]
    fn move_to_rejected_appends_to_the_supplied_log() {
        let repo = repository();
        let moved = repo
            .move_to_rejected("b", vec![message("earlier")])
            .unwrap();

        assert_eq!(moved.message.status, MessageStatus::Rejected);
        let ids: Vec<&str> = moved.destination.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["earlier", "b"]);
    }

    #[test]
    fn moves_of_unknown_ids_yield_nothing() {
        let repo = repository();
        assert!(repo.move_to_approved("missing", vec![]).is_none());
        assert!(repo.move_to_rejected("old", vec![]).is_none());
    }
}
