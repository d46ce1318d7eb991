use std::path::PathBuf;

/// Errors from manifest persistence.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// I/O failure reading or writing the manifest document.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted document cannot be parsed.
    ///
    /// Fatal for the calling operation: silently discarding a corrupt
    /// manifest would lose the only record of what is synced.
    #[error("corrupt manifest at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Serialization failure while writing a document.
    #[error("manifest serialization error: {0}")]
    Serialize(String),
}

impl ManifestError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;
