//! Error types shared across the identifier types.

/// Errors from constructing or parsing identifier types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    /// A digest string is not valid hexadecimal.
    #[error("invalid hex digest: {0}")]
    InvalidHex(String),

    /// A digest has the wrong byte length.
    #[error("invalid digest length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A logical path violates the tree path contract.
    #[error("invalid tree path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },
}
