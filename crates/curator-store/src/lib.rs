pub mod encoding;
pub mod error;
pub mod github;
pub mod memory;

pub use error::StoreError;
pub use github::{GithubContentStore, StoreConfig};
pub use memory::MemoryStore;

use curator_types::{Bucket, CollectionDocument, Revision};

/// Read/write access to one collection document per bucket.
///
/// Reads never fail hard: a bucket that cannot be fetched degrades to an
/// empty document so the operator always has something to look at. Writes
/// carry the full error taxonomy and are never retried here.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Whether a write credential is configured. [`DocumentStore::write`] on
    /// a store that answers `false` fails with [`StoreError::Unauthorized`]
    /// before any I/O.
    fn can_write(&self) -> bool;

    /// Fetch a bucket's document and, when the backend supports it, the
    /// revision proving the version read.
    async fn read(&self, bucket: Bucket) -> (CollectionDocument, Option<Revision>);

    /// Replace a bucket's document wholesale. Implementations re-read the
    /// current revision immediately before writing so a concurrent edit is
    /// rejected by the backend instead of silently clobbered.
    async fn write(
        &self,
        bucket: Bucket,
        document: &CollectionDocument,
    ) -> Result<Revision, StoreError>;
}
