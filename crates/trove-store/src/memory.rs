use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use trove_types::Digest;

use crate::error::StoreResult;
use crate::traits::BlobStore;

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. All blobs are held in memory behind a
/// `RwLock` for safe concurrent access and cloned on read. The store counts
/// successful inserts so tests can assert that a repeated push performs
/// zero blob writes.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<Digest, Vec<u8>>>,
    puts: AtomicU64,
}

impl InMemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
            puts: AtomicU64::new(0),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }

    /// Number of `put` calls that actually inserted a new blob.
    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::SeqCst)
    }

    /// Remove all blobs from the store.
    pub fn clear(&self) {
        self.blobs.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of all digests in the store.
    pub fn all_digests(&self) -> Vec<Digest> {
        let map = self.blobs.read().expect("lock poisoned");
        let mut digests: Vec<Digest> = map.keys().copied().collect();
        digests.sort();
        digests
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn get(&self, digest: &Digest) -> StoreResult<Option<Vec<u8>>> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.get(digest).cloned())
    }

    fn put(&self, digest: &Digest, data: &[u8]) -> StoreResult<()> {
        let mut map = self.blobs.write().expect("lock poisoned");
        // Idempotent: if already present, skip (content-addressing guarantees
        // the same digest always maps to the same content).
        if !map.contains_key(digest) {
            map.insert(*digest, data.to_vec());
            self.puts.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn contains(&self, digest: &Digest) -> StoreResult<bool> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.contains_key(digest))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryBlobStore")
            .field("blob_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(byte: u8) -> Digest {
        Digest::from_hash([byte; 32])
    }

    // -----------------------------------------------------------------------
    // Core operations
    // -----------------------------------------------------------------------

    #[test]
    fn put_and_get() {
        let store = InMemoryBlobStore::new();
        store.put(&digest(1), b"hello world").unwrap();

        let data = store.get(&digest(1)).unwrap().expect("should exist");
        assert_eq!(data, b"hello world");
    }

    #[test]
    fn get_missing_blob_returns_none() {
        let store = InMemoryBlobStore::new();
        assert!(store.get(&digest(9)).unwrap().is_none());
    }

    #[test]
    fn contains_tracks_presence() {
        let store = InMemoryBlobStore::new();
        assert!(!store.contains(&digest(1)).unwrap());
        store.put(&digest(1), b"data").unwrap();
        assert!(store.contains(&digest(1)).unwrap());
    }

    // -----------------------------------------------------------------------
    // Idempotency and write counting
    // -----------------------------------------------------------------------

    #[test]
    fn put_is_idempotent() {
        let store = InMemoryBlobStore::new();
        store.put(&digest(1), b"content").unwrap();
        store.put(&digest(1), b"content").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.put_count(), 1);
    }

    #[test]
    fn put_count_tracks_distinct_inserts() {
        let store = InMemoryBlobStore::new();
        store.put(&digest(1), b"a").unwrap();
        store.put(&digest(2), b"b").unwrap();
        store.put(&digest(1), b"a").unwrap();
        assert_eq!(store.put_count(), 2);
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn len_and_is_empty() {
        let store = InMemoryBlobStore::new();
        assert!(store.is_empty());
        store.put(&digest(1), b"a").unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn total_bytes() {
        let store = InMemoryBlobStore::new();
        store.put(&digest(1), b"12345").unwrap();
        store.put(&digest(2), b"123456789").unwrap();
        assert_eq!(store.total_bytes(), 14);
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemoryBlobStore::new();
        store.put(&digest(1), b"a").unwrap();
        store.put(&digest(2), b"b").unwrap();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn all_digests_is_sorted() {
        let store = InMemoryBlobStore::new();
        store.put(&digest(3), b"c").unwrap();
        store.put(&digest(1), b"a").unwrap();
        store.put(&digest(2), b"b").unwrap();

        let digests = store.all_digests();
        assert_eq!(digests, vec![digest(1), digest(2), digest(3)]);
    }

    // -----------------------------------------------------------------------
    // Concurrent read safety
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryBlobStore::new());
        store.put(&digest(7), b"shared data").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let data = store.get(&digest(7)).unwrap();
                    assert_eq!(data.as_deref(), Some(&b"shared data"[..]));
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    #[test]
    fn debug_format() {
        let store = InMemoryBlobStore::new();
        store.put(&digest(1), b"x").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryBlobStore"));
        assert!(debug.contains("blob_count"));
    }
}
