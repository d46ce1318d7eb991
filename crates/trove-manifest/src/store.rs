use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::TreeConfig;
use crate::document::Manifest;
use crate::error::{ManifestError, ManifestResult};

/// Name of the hidden configuration directory inside a working tree.
pub const DOT_DIR: &str = ".trove";

/// Name of the manifest document inside [`DOT_DIR`].
pub const MANIFEST_NAME: &str = "manifest.json";

/// Name of the optional config document inside [`DOT_DIR`].
pub const CONFIG_NAME: &str = "config.json";

/// The hidden configuration directory for a working tree root.
pub fn trove_dir(root: &Path) -> PathBuf {
    root.join(DOT_DIR)
}

/// The manifest document location for a working tree root.
pub fn manifest_path(root: &Path) -> PathBuf {
    trove_dir(root).join(MANIFEST_NAME)
}

fn config_path(root: &Path) -> PathBuf {
    trove_dir(root).join(CONFIG_NAME)
}

/// Loads and persists the manifest document for a working tree.
///
/// The store exclusively owns the in-memory [`Manifest`] for the duration
/// of one operation; callers reload at the start of every status/push and
/// never retain a manifest across calls.
pub struct ManifestStore;

impl ManifestStore {
    /// Load the manifest for a working tree.
    ///
    /// An absent document is an empty manifest (first use of a tree is not
    /// an error). An unparseable document is [`ManifestError::Corrupt`] and
    /// fatal for the calling operation.
    pub fn load(root: &Path) -> ManifestResult<Manifest> {
        let path = manifest_path(root);
        match fs::read(&path) {
            Ok(data) => serde_json::from_slice(&data).map_err(|e| ManifestError::Corrupt {
                path,
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Manifest::new()),
            Err(e) => Err(ManifestError::io(path, e)),
        }
    }

    /// Persist the manifest for a working tree.
    ///
    /// The document is serialized to a temp file inside `.trove/` and
    /// renamed over the target, so a crash mid-write never leaves a corrupt
    /// manifest visible to a concurrent reader.
    pub fn save(root: &Path, manifest: &Manifest) -> ManifestResult<()> {
        let dir = trove_dir(root);
        fs::create_dir_all(&dir).map_err(|e| ManifestError::io(&dir, e))?;

        let data = serde_json::to_vec_pretty(manifest)
            .map_err(|e| ManifestError::Serialize(e.to_string()))?;

        let target = manifest_path(root);
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| ManifestError::io(&dir, e))?;
        tmp.write_all(&data)
            .map_err(|e| ManifestError::io(tmp.path(), e))?;
        tmp.persist(&target)
            .map_err(|e| ManifestError::io(&target, e.error))?;

        debug!(entries = manifest.len(), path = %target.display(), "manifest saved");
        Ok(())
    }

    /// Load the optional tree config, defaulting when absent.
    ///
    /// A present-but-unparseable config is treated like a corrupt manifest:
    /// fatal, never silently replaced with defaults.
    pub fn load_config(root: &Path) -> ManifestResult<TreeConfig> {
        let path = config_path(root);
        match fs::read(&path) {
            Ok(data) => serde_json::from_slice(&data).map_err(|e| ManifestError::Corrupt {
                path,
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(TreeConfig::default()),
            Err(e) => Err(ManifestError::io(path, e)),
        }
    }
}
