//! Working-tree status: the result of diffing a tree against its manifest.

use serde::{Deserialize, Serialize};
use trove_types::TreePath;

/// Drift between a working tree and its manifest.
///
/// Every discovered logical path lands in exactly one category or is clean
/// and omitted. Each list is sorted lexicographically, and empty lists are
/// always serialized as `[]`, never null, so repeated status calls against
/// unchanged state compare (and serialize) identically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStatus {
    /// Present on disk, absent from the manifest.
    #[serde(default)]
    pub unstored: Vec<TreePath>,
    /// Present in both, content hash differs.
    #[serde(default)]
    pub modified: Vec<TreePath>,
    /// Present in the manifest, absent from disk.
    #[serde(default)]
    pub missing: Vec<TreePath>,
}

impl TreeStatus {
    /// Create an empty status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there is no drift of any kind.
    pub fn is_clean(&self) -> bool {
        self.unstored.is_empty() && self.modified.is_empty() && self.missing.is_empty()
    }

    /// Total number of paths across all categories.
    pub fn total_entries(&self) -> usize {
        self.unstored.len() + self.modified.len() + self.missing.len()
    }

    /// Sort every category lexicographically.
    pub(crate) fn sort(&mut self) {
        self.unstored.sort();
        self.modified.sort();
        self.missing.sort();
    }
}
