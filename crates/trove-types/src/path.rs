use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// The stable, root-relative identifier for a tracked file.
///
/// A `TreePath` is always relative, forward-slash separated, and free of
/// `.`/`..` segments, so it can never escape the working-tree root it is
/// resolved against. Construction validates; resolution to and from
/// filesystem locations is purely derivational and never touches the disk.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreePath(String);

impl TreePath {
    /// Create a validated logical path.
    pub fn new(path: impl Into<String>) -> Result<Self, TypeError> {
        let path = path.into();
        if path.is_empty() {
            return Err(Self::invalid(&path, "path is empty"));
        }
        if path.contains('\\') {
            return Err(Self::invalid(&path, "backslash separator; use forward slashes"));
        }
        if path.starts_with('/') {
            return Err(Self::invalid(&path, "path is absolute"));
        }
        for segment in path.split('/') {
            match segment {
                "" => return Err(Self::invalid(&path, "empty path segment")),
                "." | ".." => {
                    return Err(Self::invalid(&path, "relative segment escapes the root"))
                }
                _ => {}
            }
        }
        Ok(Self(path))
    }

    /// The logical path as a slash-separated string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve this logical path to an absolute location under `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        self.0.split('/').fold(root.to_path_buf(), |p, s| p.join(s))
    }

    /// Derive the logical path of an on-disk `location` under `root`.
    ///
    /// Fails when `location` is not inside `root` or contains a segment
    /// that is not valid UTF-8.
    pub fn from_fs_path(root: &Path, location: &Path) -> Result<Self, TypeError> {
        let relative = location.strip_prefix(root).map_err(|_| TypeError::InvalidPath {
            path: location.display().to_string(),
            reason: format!("not under working tree root {}", root.display()),
        })?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(s) => {
                    let s = s.to_str().ok_or_else(|| TypeError::InvalidPath {
                        path: location.display().to_string(),
                        reason: "path segment is not valid UTF-8".to_string(),
                    })?;
                    segments.push(s);
                }
                _ => {
                    return Err(TypeError::InvalidPath {
                        path: location.display().to_string(),
                        reason: "non-normal path component".to_string(),
                    })
                }
            }
        }
        Self::new(segments.join("/"))
    }

    fn invalid(path: &str, reason: &str) -> TypeError {
        TypeError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Debug for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreePath({:?})", self.0)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TreePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for TreePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TreePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_relative_paths() {
        let path = TreePath::new("some/other_file").unwrap();
        assert_eq!(path.as_str(), "some/other_file");
    }

    #[test]
    fn rejects_empty_path() {
        let err = TreePath::new("").unwrap_err();
        assert!(matches!(err, TypeError::InvalidPath { .. }));
    }

    #[test]
    fn rejects_absolute_path() {
        assert!(TreePath::new("/etc/passwd").is_err());
    }

    #[test]
    fn rejects_parent_segments() {
        assert!(TreePath::new("../outside").is_err());
        assert!(TreePath::new("some/../other").is_err());
        assert!(TreePath::new("some/./file").is_err());
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(TreePath::new("some//file").is_err());
        assert!(TreePath::new("trailing/").is_err());
    }

    #[test]
    fn rejects_backslashes() {
        assert!(TreePath::new("some\\file").is_err());
    }

    #[test]
    fn resolve_joins_segments() {
        let path = TreePath::new("some/file").unwrap();
        let resolved = path.resolve(Path::new("/tree"));
        assert_eq!(resolved, Path::new("/tree").join("some").join("file"));
    }

    #[test]
    fn from_fs_path_roundtrip() {
        let root = Path::new("/tree");
        let path = TreePath::new("some/nested/file").unwrap();
        let location = path.resolve(root);
        let derived = TreePath::from_fs_path(root, &location).unwrap();
        assert_eq!(derived, path);
    }

    #[test]
    fn from_fs_path_rejects_outside_root() {
        let err = TreePath::from_fs_path(Path::new("/tree"), Path::new("/elsewhere/file"))
            .unwrap_err();
        assert!(matches!(err, TypeError::InvalidPath { .. }));
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = TreePath::new("some/file").unwrap();
        let b = TreePath::new("some/other_file").unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_roundtrip() {
        let path = TreePath::new("dir/file.bin").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"dir/file.bin\"");
        let parsed: TreePath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, parsed);
    }

    #[test]
    fn deserialize_validates() {
        let result: Result<TreePath, _> = serde_json::from_str("\"../escape\"");
        assert!(result.is_err());
    }
}
