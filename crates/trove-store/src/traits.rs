use trove_types::Digest;

use crate::error::StoreResult;

/// External content-addressed blob store.
///
/// All implementations must satisfy these invariants:
/// - Blobs are immutable once written. Content-addressing guarantees this:
///   the same digest always maps to the same bytes.
/// - `put` is idempotent; writing a digest that already exists is a no-op
///   and never corrupts the existing entry.
/// - A missing blob is `Ok(None)`, never an error.
/// - All transport and I/O errors are propagated, never silently ignored.
pub trait BlobStore: Send + Sync {
    /// Fetch a blob by its content digest. Returns `Ok(None)` if absent.
    fn get(&self, digest: &Digest) -> StoreResult<Option<Vec<u8>>>;

    /// Store a blob under its content digest.
    ///
    /// The caller is responsible for `digest` actually being the digest of
    /// `data`; the sync engine always computes it immediately beforehand.
    fn put(&self, digest: &Digest, data: &[u8]) -> StoreResult<()>;

    /// Check whether a blob exists in the store.
    fn contains(&self, digest: &Digest) -> StoreResult<bool>;
}
