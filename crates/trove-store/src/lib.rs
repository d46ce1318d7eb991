//! Blob storage for trove.
//!
//! Blobs are file contents addressed solely by their content digest. Two
//! storage layers cooperate:
//!
//! - [`BlobStore`] -- the external, shared store every manifest hash must
//!   ultimately be retrievable from. Transport and auth live entirely
//!   behind this trait; the sync engine only ever calls `put`/`get`/
//!   `contains`.
//! - [`BlobCache`] -- a filesystem cache shared across working trees,
//!   keyed by digest, used to avoid redundant uploads and downloads. It is
//!   additive and evictable: absence of an entry is always a recoverable
//!   miss, never an error.
//!
//! # Design Rules
//!
//! 1. Blobs are immutable once written (content-addressing guarantees this).
//! 2. `put` is idempotent; an existing entry is never truncated or rewritten.
//! 3. Concurrent duplicate writes are harmless (same digest, same content),
//!    and each entry is written to a temp file and renamed into place so a
//!    torn write is never visible.
//! 4. Cache misses are `None`, not errors; all I/O failures are propagated.

pub mod cache;
pub mod error;
pub mod memory;
pub mod traits;

pub use cache::BlobCache;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryBlobStore;
pub use traits::BlobStore;
