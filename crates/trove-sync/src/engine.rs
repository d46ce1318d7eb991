//! The sync engine: status computation and push/pull/clean reconciliation.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::debug;
use trove_hash::ContentHasher;
use trove_manifest::{ManifestRecord, ManifestStore};
use trove_store::{BlobCache, BlobStore};
use trove_types::{Digest, TreePath};

use crate::error::{SyncError, SyncResult};
use crate::status::TreeStatus;
use crate::walk::TreeWalker;

/// Reconciles a working tree with its manifest and the blob store.
///
/// The engine is synchronous per invocation and holds no per-tree state:
/// the manifest is reloaded at the start of every operation and never
/// retained across calls. Operations are safe to invoke from any thread,
/// but callers must not run two operations concurrently against the *same*
/// working tree root -- [`SyncEngine::push`] performs a read-modify-write
/// of the manifest with no built-in lock, so concurrent pushes need
/// external coordination (a file lock or a single-writer convention).
///
/// The blob cache is an explicit constructor argument rather than shared
/// process state, so isolated engines (e.g. one per test) coexist by
/// pointing at different cache roots.
pub struct SyncEngine {
    cache: BlobCache,
    store: Arc<dyn BlobStore>,
}

impl SyncEngine {
    /// Create an engine over the given cache and blob store.
    pub fn new(cache: BlobCache, store: Arc<dyn BlobStore>) -> Self {
        Self { cache, store }
    }

    /// The local blob cache this engine consults before the store.
    pub fn cache(&self) -> &BlobCache {
        &self.cache
    }

    /// Compute the drift between the working tree at `root` and its
    /// manifest.
    ///
    /// Walks the tree (excluding `.trove/` and ignored paths), classifies
    /// every discovered path as unstored, modified, or clean, and reports
    /// manifest paths never discovered as missing. Ignored paths are
    /// invisible to the engine entirely: a manifest path under the ignore
    /// list is not reported missing, so a later pull never overwrites it.
    /// A single unreadable file aborts the whole call: a partial diff
    /// would be misleading.
    pub fn status(&self, root: &Path) -> SyncResult<TreeStatus> {
        let manifest = ManifestStore::load(root)?;
        let config = ManifestStore::load_config(root)?;

        let mut status = TreeStatus::new();
        let mut discovered = BTreeSet::new();
        for entry in TreeWalker::new(root, config.clone()) {
            let entry = entry?;
            match manifest.get(&entry.path) {
                None => status.unstored.push(entry.path.clone()),
                Some(record) => {
                    if entry.digest()? != record.hash {
                        status.modified.push(entry.path.clone());
                    }
                }
            }
            discovered.insert(entry.path);
        }
        for path in manifest.paths() {
            if !discovered.contains(path) && !config.is_ignored(path) {
                status.missing.push(path.clone());
            }
        }

        status.sort();
        Ok(status)
    }

    /// Store all unsynced content and update the manifest.
    ///
    /// Every unstored or modified file is read and hashed; when the cache
    /// does not already hold the digest, the content is written to the
    /// blob store and the cache. The manifest is saved atomically only
    /// after every file has been stored, so a failed push leaves it
    /// exactly as it was -- re-running is always safe, and blobs stored
    /// before the failure are deduplicated by digest on retry.
    ///
    /// Idempotent: a second push with no intervening filesystem change
    /// performs zero blob writes and no manifest rewrite.
    pub fn push(&self, root: &Path) -> SyncResult<()> {
        let status = self.status(root)?;
        if status.unstored.is_empty() && status.modified.is_empty() {
            debug!(root = %root.display(), "push: nothing to store");
            return Ok(());
        }

        let mut manifest = ManifestStore::load(root)?;
        for path in status.unstored.iter().chain(&status.modified) {
            let location = path.resolve(root);
            let data = fs::read(&location).map_err(|e| SyncError::io(&location, e))?;
            let digest = ContentHasher::BLOB.hash(&data);

            if !self.cache.contains(&digest) {
                self.store.put(&digest, &data)?;
                self.cache.put(&digest, &data)?;
                debug!(path = %path, digest = %digest.short_hex(), bytes = data.len(), "stored blob");
            }

            manifest.upsert(
                path.clone(),
                ManifestRecord {
                    hash: digest,
                    size: data.len() as u64,
                },
            );
        }

        ManifestStore::save(root, &manifest)?;
        Ok(())
    }

    /// Materialize manifest content onto disk.
    ///
    /// Every manifest path that is missing on disk, or whose on-disk
    /// content differs from the recorded digest, is rewritten from the
    /// cache (falling back to the blob store, populating the cache on the
    /// way). Fetched content is verified against the recorded digest, and
    /// each file is written via temp-then-rename.
    pub fn pull(&self, root: &Path) -> SyncResult<()> {
        let status = self.status(root)?;
        let manifest = ManifestStore::load(root)?;

        for path in status.missing.iter().chain(&status.modified) {
            // A record can disappear between the status walk and the
            // reload; treat that as already reconciled.
            let Some(record) = manifest.get(path) else {
                continue;
            };
            let data = self.fetch_blob(path, &record.hash)?;

            let location = path.resolve(root);
            let parent = location.parent().expect("resolved path always has a parent");
            fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;

            let mut tmp = NamedTempFile::new_in(parent).map_err(|e| SyncError::io(parent, e))?;
            tmp.write_all(&data).map_err(|e| SyncError::io(tmp.path(), e))?;
            tmp.persist(&location)
                .map_err(|e| SyncError::io(&location, e.error))?;

            debug!(path = %path, digest = %record.hash.short_hex(), "pulled blob");
        }
        Ok(())
    }

    /// Remove every discovered file the manifest does not declare.
    ///
    /// Ignored paths and `.trove/` are never touched; directories left
    /// empty are not pruned.
    pub fn clean(&self, root: &Path) -> SyncResult<()> {
        let manifest = ManifestStore::load(root)?;
        let config = ManifestStore::load_config(root)?;

        for entry in TreeWalker::new(root, config) {
            let entry = entry?;
            if !manifest.contains(&entry.path) {
                fs::remove_file(&entry.location)
                    .map_err(|e| SyncError::io(&entry.location, e))?;
                debug!(path = %entry.path, "removed untracked file");
            }
        }
        Ok(())
    }

    /// Fetch and verify a blob, consulting the cache before the store.
    fn fetch_blob(&self, path: &TreePath, digest: &Digest) -> SyncResult<Vec<u8>> {
        if let Some(data) = self.cache.get(digest)? {
            self.verify(path, digest, &data)?;
            return Ok(data);
        }

        let Some(data) = self.store.get(digest)? else {
            return Err(SyncError::BlobNotFound {
                path: path.clone(),
                digest: *digest,
            });
        };
        self.verify(path, digest, &data)?;
        self.cache.put(digest, &data)?;
        Ok(data)
    }

    fn verify(&self, path: &TreePath, expected: &Digest, data: &[u8]) -> SyncResult<()> {
        let computed = ContentHasher::BLOB.hash(data);
        if computed != *expected {
            return Err(SyncError::DigestMismatch {
                path: path.clone(),
                expected: *expected,
                computed,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("cache", &self.cache)
            .finish()
    }
}
