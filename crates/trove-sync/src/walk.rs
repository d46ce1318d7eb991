//! Lazy working-tree traversal.

use std::io;
use std::path::{Path, PathBuf};

use trove_hash::ContentHasher;
use trove_manifest::{TreeConfig, DOT_DIR};
use trove_types::{Digest, TreePath};
use walkdir::WalkDir;

use crate::error::{SyncError, SyncResult};

/// A regular file discovered in the working tree.
///
/// The content digest is not part of the entry; it is computed on demand
/// via [`WorkingTreeEntry::digest`] so that clean-path detection only pays
/// for hashing when the manifest actually declares the path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingTreeEntry {
    /// Logical path relative to the working-tree root.
    pub path: TreePath,
    /// Absolute on-disk location.
    pub location: PathBuf,
    /// Byte length at discovery time.
    pub size: u64,
}

impl WorkingTreeEntry {
    /// Compute the content digest of this file, streaming from disk.
    pub fn digest(&self) -> SyncResult<Digest> {
        ContentHasher::BLOB
            .hash_file(&self.location)
            .map_err(|e| SyncError::io(&self.location, e))
    }
}

/// Lazy, restartable iterator over the regular files of a working tree.
///
/// Skips the hidden `.trove/` directory and config-ignored paths, and
/// yields entries in a deterministic (file-name sorted) order. The walker
/// holds no state between invocations; every status/push constructs a
/// fresh one.
pub struct TreeWalker {
    root: PathBuf,
    config: TreeConfig,
    inner: walkdir::IntoIter,
}

impl TreeWalker {
    /// Start a walk at the given root with the given tree config.
    pub fn new(root: &Path, config: TreeConfig) -> Self {
        let inner = WalkDir::new(root).sort_by_file_name().into_iter();
        Self {
            root: root.to_path_buf(),
            config,
            inner,
        }
    }
}

impl Iterator for TreeWalker {
    type Item = SyncResult<WorkingTreeEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(walk_error(e))),
            };

            if entry.file_type().is_dir() {
                if entry.depth() > 0 && entry.file_name() == DOT_DIR {
                    self.inner.skip_current_dir();
                }
                continue;
            }
            // Symlinks and other non-regular files are not tracked.
            if !entry.file_type().is_file() {
                continue;
            }

            let path = match TreePath::from_fs_path(&self.root, entry.path()) {
                Ok(path) => path,
                Err(e) => return Some(Err(e.into())),
            };
            if self.config.is_ignored(&path) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => return Some(Err(walk_error(e))),
            };

            return Some(Ok(WorkingTreeEntry {
                path,
                location: entry.path().to_path_buf(),
                size,
            }));
        }
    }
}

fn walk_error(err: walkdir::Error) -> SyncError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
    SyncError::Io { path, source }
}
