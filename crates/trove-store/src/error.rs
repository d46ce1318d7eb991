use std::path::PathBuf;

use trove_types::Digest;

/// Errors from blob store and cache operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O failure in the filesystem cache.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote store is unavailable or rejected the operation.
    #[error("blob store backend error: {0}")]
    Backend(String),

    /// A stored entry does not match its digest (data corruption).
    #[error("corrupt blob {digest}: {reason}")]
    CorruptBlob { digest: Digest, reason: String },
}

impl StoreError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
