//! Streaming content hashing for trove blobs.
//!
//! Every blob digest in trove is a domain-separated BLAKE3 hash of the full
//! byte content of a file, never of its metadata. [`ContentHasher`] is the
//! single place digests are computed: the manifest, the blob cache, and the
//! sync engine all agree on a digest because they all go through it.

pub mod hasher;

pub use hasher::ContentHasher;
