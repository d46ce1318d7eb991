use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use trove_types::Digest;

/// Read buffer size for streaming hashes.
const CHUNK_SIZE: usize = 64 * 1024;

/// Domain-separated BLAKE3 content hasher.
///
/// The hasher carries a domain tag (e.g. `"trove-blob-v1"`) that is
/// prepended to every hash computation, so digests from a future format
/// revision can never collide with today's. Hashing is streamed in
/// fixed-size chunks; large files are never buffered whole in memory.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for blob content.
    pub const BLOB: Self = Self {
        domain: "trove-blob-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash in-memory bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> Digest {
        let mut hasher = self.hasher();
        hasher.update(data);
        Digest::from_hash(*hasher.finalize().as_bytes())
    }

    /// Hash everything a reader yields, streaming in fixed-size chunks.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<Digest> {
        let mut hasher = self.hasher();
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(Digest::from_hash(*hasher.finalize().as_bytes()))
    }

    /// Hash the full content of a file on disk.
    pub fn hash_file(&self, path: &Path) -> io::Result<Digest> {
        let file = File::open(path)?;
        self.hash_reader(BufReader::new(file))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &Digest) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }

    fn hasher(&self) -> blake3::Hasher {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let data = b"hello world";
        let d1 = ContentHasher::BLOB.hash(data);
        let d2 = ContentHasher::BLOB.hash(data);
        assert_eq!(d1, d2);
    }

    #[test]
    fn different_content_produces_different_digests() {
        assert_ne!(
            ContentHasher::BLOB.hash(b"hello"),
            ContentHasher::BLOB.hash(b"world")
        );
    }

    #[test]
    fn different_domains_produce_different_digests() {
        let data = b"same content";
        let custom = ContentHasher::new("trove-test-v1");
        assert_ne!(ContentHasher::BLOB.hash(data), custom.hash(data));
    }

    #[test]
    fn reader_matches_bytes() {
        let data = b"streamed content".to_vec();
        let from_bytes = ContentHasher::BLOB.hash(&data);
        let from_reader = ContentHasher::BLOB.hash_reader(&data[..]).unwrap();
        assert_eq!(from_bytes, from_reader);
    }

    #[test]
    fn reader_streams_across_chunk_boundaries() {
        // Three full chunks plus a partial one.
        let data = vec![0xa7u8; CHUNK_SIZE * 3 + 17];
        let from_bytes = ContentHasher::BLOB.hash(&data);
        let from_reader = ContentHasher::BLOB.hash_reader(&data[..]).unwrap();
        assert_eq!(from_bytes, from_reader);
    }

    #[test]
    fn file_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, b"file content").unwrap();

        let from_file = ContentHasher::BLOB.hash_file(&path).unwrap();
        assert_eq!(from_file, ContentHasher::BLOB.hash(b"file content"));
    }

    #[test]
    fn hash_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentHasher::BLOB
            .hash_file(&dir.path().join("nope"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn verify_correct_and_tampered_data() {
        let digest = ContentHasher::BLOB.hash(b"original");
        assert!(ContentHasher::BLOB.verify(b"original", &digest));
        assert!(!ContentHasher::BLOB.verify(b"tampered", &digest));
    }
}
