use curator_store::StoreError;
use curator_types::Bucket;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("a sync key is required to save changes")]
    Unauthorized,

    #[error("no pending message with id {0}")]
    NotFound(String),

    /// The first document landed but the second did not: storage is now
    /// ahead of memory for `persisted` and behind for `failed`. Re-running
    /// the action or fixing the repository by hand reconciles it.
    #[error("{persisted} was saved but writing {failed} failed: {source}")]
    PartialWrite {
        persisted: Bucket,
        failed: Bucket,
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
