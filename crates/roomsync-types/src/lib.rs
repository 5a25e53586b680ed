//! Foundation types for roomsync.
//!
//! Every other roomsync crate depends on `roomsync-types`.
//!
//! # Key Types
//!
//! - [`ArtifactKind`]: The two artifacts a project can hold, with their
//!   canonical file names and required upload extensions
//! - [`Fingerprint`]: Content digest used as a freshness token

pub mod artifact;
pub mod error;
pub mod fingerprint;

pub use artifact::ArtifactKind;
pub use error::TypeError;
pub use fingerprint::Fingerprint;
