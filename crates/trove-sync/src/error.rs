use std::path::PathBuf;

use trove_manifest::ManifestError;
use trove_store::StoreError;
use trove_types::{Digest, TreePath, TypeError};

/// Explicit classification of a sync error.
///
/// Callers that map errors onto an outer surface (exit codes, HTTP status
/// codes) dispatch on this tag instead of inspecting concrete error types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A logical path escapes the root or is malformed.
    InvalidPath,
    /// Read/write/walk failure on the working tree.
    Io,
    /// The persisted manifest or config cannot be parsed.
    CorruptManifest,
    /// The blob store is unavailable or rejected an operation.
    Store,
    /// A manifest blob is absent from both the cache and the store.
    NotFound,
    /// Stored content does not match its recorded digest.
    Corrupt,
}

/// Errors from status/push/pull/clean operations.
///
/// Every error aborts the enclosing operation and carries enough context
/// (path, digest, underlying cause) to diagnose. Nothing is retried
/// internally; a failed push leaves the manifest untouched, so re-running
/// after fixing the cause is always safe.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Invalid logical path.
    #[error(transparent)]
    Path(#[from] TypeError),

    /// I/O failure on the working tree.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest load/save failure.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Blob store or cache failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A manifest blob could not be found in the cache or the store.
    #[error("blob {digest} for {path} not found in cache or blob store")]
    BlobNotFound { path: TreePath, digest: Digest },

    /// Fetched content does not match the manifest's recorded digest.
    #[error("digest mismatch for {path}: manifest records {expected}, content hashes to {computed}")]
    DigestMismatch {
        path: TreePath,
        expected: Digest,
        computed: Digest,
    },
}

impl SyncError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The explicit classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Path(_) => ErrorKind::InvalidPath,
            Self::Io { .. } => ErrorKind::Io,
            Self::Manifest(ManifestError::Corrupt { .. }) => ErrorKind::CorruptManifest,
            Self::Manifest(_) => ErrorKind::Io,
            Self::Store(StoreError::CorruptBlob { .. }) => ErrorKind::Corrupt,
            Self::Store(_) => ErrorKind::Store,
            Self::BlobNotFound { .. } => ErrorKind::NotFound,
            Self::DigestMismatch { .. } => ErrorKind::Corrupt,
        }
    }
}

/// Result alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
