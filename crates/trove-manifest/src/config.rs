use serde::{Deserialize, Serialize};
use trove_types::TreePath;

/// Optional per-tree configuration, stored next to the manifest.
///
/// An absent config document is equivalent to the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Logical paths excluded from tracking. A discovered file is skipped
    /// when its logical path equals an ignored path or sits underneath one.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl TreeConfig {
    /// Returns `true` if the given logical path is excluded from tracking.
    pub fn is_ignored(&self, path: &TreePath) -> bool {
        self.ignore.iter().any(|prefix| {
            path.as_str() == prefix
                || path
                    .as_str()
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}
