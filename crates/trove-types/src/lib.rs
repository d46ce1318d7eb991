//! Core identifier types for trove.
//!
//! Everything trove tracks is addressed by one of two identifiers:
//!
//! - [`Digest`] -- the BLAKE3 content hash of a blob, independent of any
//!   filename. Identical content always produces the same digest, which is
//!   what makes blobs deduplicatable and pushes retry-safe.
//! - [`TreePath`] -- the stable, root-relative logical path of a tracked
//!   file, independent of the working tree's on-disk location. Logical
//!   paths are always forward-slash separated, even on Windows.
//!
//! Both types are purely derivational: construction validates, conversion
//! to and from filesystem locations never touches the disk.

pub mod digest;
pub mod error;
pub mod path;

pub use digest::Digest;
pub use error::TypeError;
pub use path::TreePath;
