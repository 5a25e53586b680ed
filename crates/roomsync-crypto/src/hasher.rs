use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use roomsync_types::Fingerprint;

/// Domain-separated BLAKE3 content hasher.
///
/// The domain tag is prepended to every hash computation, so clients must
/// use the same tag (see [`ContentHasher::ARTIFACT`]) to produce tokens the
/// server will recognize.
#[derive(Clone, Copy, Debug)]
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for room-model and positioning artifacts.
    pub const ARTIFACT: Self = Self {
        domain: "roomsync-artifact-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    fn start(&self) -> blake3::Hasher {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher
    }

    /// Fingerprint raw bytes.
    pub fn fingerprint(&self, data: &[u8]) -> Fingerprint {
        let mut hasher = self.start();
        hasher.update(data);
        Fingerprint::from_hash(*hasher.finalize().as_bytes())
    }

    /// Fingerprint a file by streaming its contents through the hasher.
    pub fn fingerprint_file(&self, path: &Path) -> Result<Fingerprint, HasherError> {
        let unreadable = |source| HasherError::UnreadableContent {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::open(path).map_err(unreadable)?;
        let mut hasher = self.start();
        io::copy(&mut file, &mut hasher).map_err(unreadable)?;
        Ok(Fingerprint::from_hash(*hasher.finalize().as_bytes()))
    }

    /// Whether `token` is the canonical fingerprint of `data`.
    pub fn matches(&self, data: &[u8], token: &str) -> bool {
        self.fingerprint(data).matches_token(token)
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::ARTIFACT
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error)]
pub enum HasherError {
    #[error("unreadable content at {}: {source}", .path.display())]
    UnreadableContent {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
