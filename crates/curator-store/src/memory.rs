//! In-process revisioned document store. Backs the test suites and offline
//! runs with the same contract as the remote store: content-addressed
//! revisions, wholesale writes, degrade-to-empty reads.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use curator_types::{Bucket, CollectionDocument, Revision};
use sha2::{Digest, Sha256};

use crate::DocumentStore;
use crate::error::StoreError;

pub struct MemoryStore {
    inner: Mutex<Inner>,
    writable: bool,
}

#[derive(Default)]
struct Inner {
    documents: HashMap<Bucket, (CollectionDocument, Revision)>,
    failing: HashSet<Bucket>,
    write_calls: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            writable: true,
        }
    }

    /// A store with no write credential: reads work, writes fail fast.
    pub fn read_only() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            writable: false,
        }
    }

    /// Place a document without going through `write` (no revision check,
    /// no counter).
    pub fn seed(&self, bucket: Bucket, document: CollectionDocument) {
        let revision = revision_of(&document);
        self.lock().documents.insert(bucket, (document, revision));
    }

    /// Make the next write to `bucket` fail with a revision conflict.
    pub fn fail_next_write(&self, bucket: Bucket) {
        self.lock().failing.insert(bucket);
    }

    /// How many writes reached the store. Unauthorized attempts fail before
    /// getting this far and do not count.
    pub fn write_calls(&self) -> u64 {
        self.lock().write_calls
    }

    /// Direct look at stored state, for asserting what actually persisted.
    pub fn stored(&self, bucket: Bucket) -> Option<CollectionDocument> {
        self.lock().documents.get(&bucket).map(|(d, _)| d.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Poisoning only happens if a holder panicked; the data is still
        // consistent for our single-operation writes.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn can_write(&self) -> bool {
        self.writable
    }

    async fn read(&self, bucket: Bucket) -> (CollectionDocument, Option<Revision>) {
        match self.lock().documents.get(&bucket) {
            Some((document, revision)) => (document.clone(), Some(revision.clone())),
            None => (CollectionDocument::empty(), None),
        }
    }

    async fn write(
        &self,
        bucket: Bucket,
        document: &CollectionDocument,
    ) -> Result<Revision, StoreError> {
        if !self.writable {
            return Err(StoreError::Unauthorized);
        }
        let mut inner = self.lock();
        inner.write_calls += 1;
        if inner.failing.remove(&bucket) {
            return Err(StoreError::Conflict(bucket.filename().to_string()));
        }
        let revision = revision_of(document);
        inner
            .documents
            .insert(bucket, (document.clone(), revision.clone()));
        Ok(revision)
    }
}

fn revision_of(document: &CollectionDocument) -> Revision {
    // Content-addressed like the real store: same bytes, same revision.
    let json = serde_json::to_string(document).unwrap_or_default();
    Revision(hex::encode(Sha256::digest(json.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_types::{Message, MessageStatus};

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

    #[tokio::test]
    async fn missing_bucket_reads_empty_without_error() {
        let store = MemoryStore::new();
        let (document, revision) = store.read(Bucket::Rejected).await;
        assert!(document.messages.is_empty());
        assert!(revision.is_none());
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let store = MemoryStore::new();
        let document = CollectionDocument::new(vec![message("abc123")]);
        let written = store.write(Bucket::Pending, &document).await.unwrap();

        let (back, revision) = store.read(Bucket::Pending).await;
        assert_eq!(back, document);
        assert_eq!(revision, Some(written));
    }

    #[tokio::test]
    async fn revision_tracks_content() {
        let store = MemoryStore::new();
        let first = store
            .write(Bucket::Pending, &CollectionDocument::new(vec![message("a")]))
            .await
            .unwrap();
        let second = store
            .write(Bucket::Pending, &CollectionDocument::new(vec![message("b")]))
            .await
            .unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn injected_failure_hits_once() {
        let store = MemoryStore::new();
        store.fail_next_write(Bucket::Approved);
        let document = CollectionDocument::new(vec![]);

        let err = store.write(Bucket::Approved, &document).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert!(store.write(Bucket::Approved, &document).await.is_ok());
    }

    #[tokio::test]
    async fn read_only_store_counts_no_writes() {
        let store = MemoryStore::read_only();
        let err = store
            .write(Bucket::Pending, &CollectionDocument::new(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized));
        assert_eq!(store.write_calls(), 0);
    }
}
