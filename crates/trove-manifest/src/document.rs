use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trove_types::{Digest, TreePath};

/// The recorded state of one tracked path: its content hash and byte size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Content digest of the synced blob.
    pub hash: Digest,
    /// Byte length of the synced content.
    pub size: u64,
}

/// The full set of manifest records for one working tree.
///
/// Backed by a `BTreeMap`, so iteration is always in lexicographic path
/// order; serialized as a single JSON object mapping path to record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<TreePath, ManifestRecord>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the record for a logical path.
    pub fn get(&self, path: &TreePath) -> Option<&ManifestRecord> {
        self.entries.get(path)
    }

    /// Returns `true` if the manifest declares the given path.
    pub fn contains(&self, path: &TreePath) -> bool {
        self.entries.contains_key(path)
    }

    /// Insert or replace the record for a path.
    pub fn upsert(&mut self, path: TreePath, record: ManifestRecord) {
        self.entries.insert(path, record);
    }

    /// Remove a path's record. Returns the record if it existed.
    pub fn remove(&mut self, path: &TreePath) -> Option<ManifestRecord> {
        self.entries.remove(path)
    }

    /// Iterate all records in lexicographic path order.
    pub fn iter(&self) -> impl Iterator<Item = (&TreePath, &ManifestRecord)> {
        self.entries.iter()
    }

    /// Iterate all declared paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &TreePath> {
        self.entries.keys()
    }

    /// Number of declared paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the manifest declares no paths.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
