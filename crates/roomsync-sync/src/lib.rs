//! Conditional synchronization for roomsync.
//!
//! A client sends the fingerprint of its cached artifact; the server only
//! transfers bytes when that token no longer matches the current content.
//! Uploads are validated by file extension and overwrite the previous
//! artifact (last writer wins).

pub mod error;
pub mod handler;
pub mod types;

pub use error::{SyncError, SyncResult};
pub use handler::{file_extension, SyncHandler};
pub use types::{ArtifactTransfer, FetchOutcome, Freshness, UploadReceipt};
