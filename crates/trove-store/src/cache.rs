use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;
use trove_types::Digest;

use crate::error::{StoreError, StoreResult};

/// Environment variable overriding the default cache root.
pub const CACHE_ROOT_ENV: &str = "TROVE_CACHE";

/// Shared, digest-keyed local blob cache.
///
/// The cache is a plain directory of blobs laid out git-objects style:
/// `<root>/<first two hex chars>/<full hex digest>`. It may be shared by
/// multiple working trees and processes; entries are written to a temp file
/// and renamed into place, so concurrent duplicate writes are harmless and
/// a torn write is never visible.
///
/// A `BlobCache` is always constructed explicitly at a root, never through
/// process-global state, so isolated instances (e.g. one per test) coexist
/// by pointing at different roots. The cache is additive: eviction is an
/// operator concern, and a missing entry is always a recoverable miss.
pub struct BlobCache {
    root: PathBuf,
}

impl BlobCache {
    /// Open (or create) a cache rooted at the given directory.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self { root })
    }

    /// The default cache root: `$TROVE_CACHE` if set, else the user cache
    /// directory, else `.trove-cache` in the current directory.
    pub fn default_root() -> PathBuf {
        if let Some(root) = std::env::var_os(CACHE_ROOT_ENV) {
            return PathBuf::from(root);
        }
        dirs::cache_dir()
            .map(|dir| dir.join("trove"))
            .unwrap_or_else(|| PathBuf::from(".trove-cache"))
    }

    /// The root directory of this cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check whether the cache holds a blob for the given digest.
    pub fn contains(&self, digest: &Digest) -> bool {
        self.entry_path(digest).is_file()
    }

    /// Fetch a cached blob. A missing entry is `Ok(None)`, not an error.
    pub fn get(&self, digest: &Digest) -> StoreResult<Option<Vec<u8>>> {
        let path = self.entry_path(digest);
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Store a blob under its digest.
    ///
    /// Idempotent: if the entry already exists it is left untouched. The
    /// blob is written to a temp file in the same shard directory and
    /// renamed over the target, so a crash mid-write never leaves a
    /// truncated entry behind.
    pub fn put(&self, digest: &Digest, data: &[u8]) -> StoreResult<()> {
        let target = self.entry_path(digest);
        if target.is_file() {
            return Ok(());
        }

        let shard = target.parent().expect("entry path always has a parent");
        fs::create_dir_all(shard).map_err(|e| StoreError::io(shard, e))?;

        let mut tmp = NamedTempFile::new_in(shard).map_err(|e| StoreError::io(shard, e))?;
        tmp.write_all(data).map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&target)
            .map_err(|e| StoreError::io(&target, e.error))?;

        debug!(digest = %digest.short_hex(), bytes = data.len(), "cached blob");
        Ok(())
    }

    fn entry_path(&self, digest: &Digest) -> PathBuf {
        let hex = digest.to_hex();
        self.root.join(&hex[..2]).join(&hex)
    }
}

impl std::fmt::Debug for BlobCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobCache").field("root", &self.root).finish()
    }
}
