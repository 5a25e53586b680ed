use serde::{Deserialize, Serialize};
use roomsync_types::{ArtifactKind, Fingerprint};

/// Result of comparing a client token with the server's current fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Freshness {
    /// The server holds different content; the client should fetch.
    Stale,
    /// The client's copy is identical; nothing to transfer.
    Current,
}

impl Freshness {
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Artifact bytes sent to a client whose copy is stale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactTransfer {
    pub kind: ArtifactKind,
    pub data: Vec<u8>,
    pub fingerprint: Fingerprint,
}

impl ArtifactTransfer {
    /// Attachment file name hint for the client.
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    pub fn media_type(&self) -> &'static str {
        self.kind.media_type()
    }
}

/// Outcome of a conditional fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The client's copy is stale; here is the current content.
    Transfer(ArtifactTransfer),
    /// The client's copy is current. Not an error.
    NothingNew,
}

impl FetchOutcome {
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Transfer(_))
    }
}

/// Receipt for an accepted upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub project: String,
    pub kind: ArtifactKind,
    pub size: u64,
    pub fingerprint: Fingerprint,
}
