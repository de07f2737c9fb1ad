use thiserror::Error;

/// Failures surfaced by the content store. Reads are degraded before they
/// reach a caller; everything here can reach the operator through a failed
/// write and must stay specific enough to act on.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No write credential configured, or the backend refused the one given.
    #[error("write credential required or rejected by the backing store")]
    Unauthorized,

    #[error("document not found: {0}")]
    NotFound(String),

    /// Revision mismatch: the document changed since it was read. Not
    /// retried, not merged.
    #[error("revision conflict writing {0}")]
    Conflict(String),

    #[error("backing store returned {status} for {path}")]
    Backend { path: String, status: u16 },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid document payload: {0}")]
    InvalidDocument(String),
}
