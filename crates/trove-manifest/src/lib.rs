//! The trove manifest: the sole source of truth for what is synced.
//!
//! Each working tree carries a hidden `.trove/` directory holding a single
//! JSON manifest document mapping logical paths to `{hash, size}` records.
//! Every hash present in the manifest must correspond to a blob retrievable
//! from the blob store or the local cache.
//!
//! # Key Types
//!
//! - [`Manifest`] -- the full path -> record mapping (BTreeMap-backed, so
//!   iteration order is deterministic)
//! - [`ManifestRecord`] -- the recorded `{hash, size}` for one path
//! - [`ManifestStore`] -- load/save with an atomic rename on save; an
//!   absent document is an empty manifest, a corrupt one is fatal
//! - [`TreeConfig`] -- optional per-tree configuration (ignore list)
//!
//! The manifest is reloaded at the start of every status/push and never
//! retained across calls, which trades a reload per invocation for freedom
//! from stale-state bugs.

pub mod config;
pub mod document;
pub mod error;
pub mod store;

pub use config::TreeConfig;
pub use document::{Manifest, ManifestRecord};
pub use error::{ManifestError, ManifestResult};
pub use store::{manifest_path, trove_dir, ManifestStore, CONFIG_NAME, DOT_DIR, MANIFEST_NAME};
