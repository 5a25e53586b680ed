//! Content fingerprinting for roomsync.
//!
//! Provides domain-separated BLAKE3 hashing of artifact bytes. The resulting
//! [`Fingerprint`](roomsync_types::Fingerprint) is a freshness token, not a
//! security boundary.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError};
