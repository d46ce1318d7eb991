//! The trove sync engine.
//!
//! Compares a working tree of files against its declared manifest and makes
//! the two converge:
//!
//! - [`SyncEngine::status`] walks the tree and classifies every logical
//!   path as unstored, modified, missing, or clean (omitted).
//! - [`SyncEngine::push`] uploads unsynced content to the blob store and
//!   the shared cache, then atomically rewrites the manifest.
//! - [`SyncEngine::pull`] materializes manifest content onto disk from the
//!   cache, falling back to the blob store.
//! - [`SyncEngine::clean`] removes files the manifest does not declare.
//!
//! Per logical path, repeated status/push cycles move through:
//! `Unstored -> (push) -> Clean -> (edit) -> Modified -> (push) -> Clean
//! -> (delete) -> Missing`.
//!
//! # Key Types
//!
//! - [`SyncEngine`] -- the engine, holding the blob cache and store
//! - [`TreeStatus`] -- sorted unstored/modified/missing path lists
//! - [`TreeWalker`] -- lazy iterator over discovered working-tree files
//! - [`SyncError`] / [`ErrorKind`] -- tagged errors with an explicit
//!   classification for dispatch

pub mod engine;
pub mod error;
pub mod status;
pub mod walk;

pub use engine::SyncEngine;
pub use error::{ErrorKind, SyncError, SyncResult};
pub use status::TreeStatus;
pub use walk::{TreeWalker, WorkingTreeEntry};
